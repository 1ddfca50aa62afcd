//! XML rendering of a validated wiring document.
//!
//! Emits the backend's import dialect: a `<Minsky>` document with
//! schemaVersion 3, item and wire lists, designated in/out variable ids,
//! and an empty groups section. Rendering is a pure serialization step,
//! separate from building; the byte layout only matters to the consuming
//! backend.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::graph::{Item, ItemKind, Wire, WiringGraph};

const XMLNS: &str = "http://minsky.sf.net/minsky";
const SCHEMA_VERSION: u32 = 3;

/// Render a wiring document as XML text.
pub fn to_xml(graph: &WiringGraph) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\"?>\n");
    let _ = writeln!(out, "<Minsky xmlns=\"{XMLNS}\">");
    let _ = writeln!(out, "  <schemaVersion>{SCHEMA_VERSION}</schemaVersion>");

    out.push_str("  <wires>\n");
    for wire in graph.wires() {
        render_wire(&mut out, wire);
    }
    out.push_str("  </wires>\n");

    out.push_str("  <items>\n");
    for item in graph.items() {
        render_item(&mut out, item);
    }
    out.push_str("  </items>\n");

    out.push_str("  <inVariables>\n");
    for id in graph.inputs() {
        let _ = writeln!(out, "    <int>{id}</int>");
    }
    out.push_str("  </inVariables>\n");

    out.push_str("  <outVariables>\n");
    for id in graph.outputs() {
        let _ = writeln!(out, "    <int>{id}</int>");
    }
    out.push_str("  </outVariables>\n");

    out.push_str("  <groups>\n  </groups>\n");
    out.push_str("</Minsky>\n");
    out
}

fn render_wire(out: &mut String, wire: &Wire) {
    out.push_str("    <Wire>\n");
    let _ = writeln!(out, "      <id>{}</id>", wire.id);
    let _ = writeln!(out, "      <from>{}</from>", wire.from);
    let _ = writeln!(out, "      <to>{}</to>", wire.to);
    out.push_str("    </Wire>\n");
}

fn render_item(out: &mut String, item: &Item) {
    out.push_str("    <Item>\n");
    let _ = writeln!(out, "      <id>{}</id>", item.id);
    let _ = writeln!(out, "      <type>{}</type>", type_tag(&item.kind));
    if let ItemKind::Variable { name, .. } = &item.kind {
        let _ = writeln!(out, "      <name>{}</name>", escape(name.as_str()));
    }
    let _ = writeln!(out, "      <x>{}</x>", item.pos.0);
    let _ = writeln!(out, "      <y>{}</y>", item.pos.1);
    out.push_str("      <zoomFactor>1</zoomFactor>\n");
    out.push_str("      <rotation>0</rotation>\n");
    out.push_str("      <width>10</width>\n");
    out.push_str("      <height>10</height>\n");

    out.push_str("      <ports>\n");
    for port in &item.ports {
        let _ = writeln!(out, "        <int>{port}</int>");
    }
    out.push_str("      </ports>\n");

    match &item.kind {
        ItemKind::Variable { init, tooltip, .. } => {
            let _ = writeln!(out, "      <init>{}</init>", escape(init.as_str()));
            render_slider(out);
            if let Some(tip) = tooltip {
                let _ = writeln!(out, "      <tooltip>{}</tooltip>", escape(tip.as_str()));
            }
        }
        ItemKind::Gather { axis } => {
            let _ = writeln!(out, "      <axis>{}</axis>", escape(axis.as_str()));
        }
        ItemKind::Add => {}
    }
    out.push_str("    </Item>\n");
}

fn render_slider(out: &mut String) {
    out.push_str("      <slider>\n");
    out.push_str("        <visible>false</visible>\n");
    out.push_str("        <stepRel>false</stepRel>\n");
    out.push_str("        <min>-1</min>\n");
    out.push_str("        <max>1</max>\n");
    out.push_str("        <step>0.1</step>\n");
    out.push_str("      </slider>\n");
}

fn type_tag(kind: &ItemKind) -> String {
    match kind {
        ItemKind::Variable { kind, .. } => format!("Variable:{}", kind.as_str()),
        ItemKind::Gather { .. } => "Operation:gather".to_string(),
        ItemKind::Add => "Operation:add".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WiringBuilder;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use sf_scenario::ParamKind;

    fn sample() -> WiringGraph {
        let mut builder = WiringBuilder::new();
        let v = builder.add_variable(
            ":a<b>",
            ParamKind::Parameter,
            "0",
            Some("x & y".to_string()),
            (0.0, 0.0),
        );
        let i = builder.add_parameter(":i", (0.0, 80.0));
        let g = builder.add_gather("name", (100.0, 0.0));
        let f = builder.add_flow(":out", (200.0, 0.0));
        builder.connect(v.output, g.data);
        builder.connect(i.output, g.index);
        builder.connect(g.output, f.input.unwrap());
        builder.mark_input(v.item);
        builder.mark_output(f.item);
        builder.finish().unwrap()
    }

    /// Count occurrences of a start tag in well-formed XML.
    fn count_elements(xml: &str, tag: &str) -> usize {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();
        let mut count = 0;
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == tag.as_bytes() => count += 1,
                Ok(Event::Eof) => break,
                Err(e) => panic!("rendered XML failed to parse: {e}"),
                _ => {}
            }
            buf.clear();
        }
        count
    }

    #[test]
    fn document_is_well_formed() {
        let xml = to_xml(&sample());
        assert_eq!(count_elements(&xml, "Minsky"), 1);
        assert_eq!(count_elements(&xml, "Item"), 4);
        assert_eq!(count_elements(&xml, "Wire"), 3);
        assert_eq!(count_elements(&xml, "inVariables"), 1);
        assert_eq!(count_elements(&xml, "outVariables"), 1);
    }

    #[test]
    fn special_characters_are_escaped() {
        let xml = to_xml(&sample());
        assert!(xml.contains("<name>:a&lt;b&gt;</name>"));
        assert!(xml.contains("<tooltip>x &amp; y</tooltip>"));
        assert!(!xml.contains("<name>:a<b></name>"));
    }

    #[test]
    fn gather_carries_axis_and_three_ports() {
        let xml = to_xml(&sample());
        assert!(xml.contains("<type>Operation:gather</type>"));
        assert!(xml.contains("<axis>name</axis>"));
    }

    #[test]
    fn header_and_schema_version() {
        let xml = to_xml(&sample());
        assert!(xml.starts_with("<?xml version=\"1.0\"?>"));
        assert!(xml.contains("<schemaVersion>3</schemaVersion>"));
        assert!(xml.contains("xmlns=\"http://minsky.sf.net/minsky\""));
    }
}
