//! Reading risk models from XML documents and writing evaluation reports back to XML.
//!
//! The input document has the following structure (the name of the root element and the
//! names of the individual entries are not significant):
//!
//! ```xml
//! <Model>
//!   <Scenarios>
//!     <Scenario name="S1" Outcome="Severe">IE*T1*NOT_T2</Scenario>
//!   </Scenarios>
//!   <InitiatingEvent><Probability>1e-2</Probability></InitiatingEvent>
//!   <TopEvents>
//!     <TopEvent name="T1">A+B</TopEvent>
//!     <TopEvent name="T2">C</TopEvent>
//!   </TopEvents>
//!   <Probabilities>
//!     <Probability name="A">0.3</Probability>
//!     <Probability name="B">0.4</Probability>
//!     <Probability name="C">0.5</Probability>
//!   </Probabilities>
//! </Model>
//! ```
//!
//! The initiating-event probability is bound to the reserved basic event `IE`. The report
//! contains one `Scenario` element per evaluated scenario (with its `MinimalCutSets` and
//! `Probability`) and an `OutcomeTotals` element with the summed probability of each outcome.

use crate::{format_probability, PraError, PraModel, PraReport, ProbabilityTable, INITIATING_EVENT};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};
use tracing::info;

/// Read and parse a model from an XML file.
pub fn load_model(path: &Path) -> Result<PraModel, PraError> {
    let text = std::fs::read_to_string(path).map_err(|source| PraError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model = parse_model_xml(&text)?;
    info!(
        path = %path.display(),
        scenarios = model.scenarios().len(),
        top_events = model.top_events().len(),
        "Loaded PRA model"
    );
    Ok(model)
}

/// Parse a model from the text of an XML document.
///
/// Fails with `PraError::Xml` if the text is not well-formed XML and with
/// `PraError::MalformedInput` if some required element, attribute or value is missing
/// or invalid. Logic strings are not parsed here.
pub fn parse_model_xml(text: &str) -> Result<PraModel, PraError> {
    let document = Document::parse(text).map_err(|e| PraError::Xml(e.to_string()))?;
    let root = document.root_element();

    let mut probabilities = ProbabilityTable::new();
    let initiating_event = child_element(root, "InitiatingEvent")?;
    let ie_probability = parse_probability(
        INITIATING_EVENT,
        &element_text(child_element(initiating_event, "Probability")?)?,
    )?;
    probabilities.insert(INITIATING_EVENT, ie_probability)?;
    for entry in child_elements(child_element(root, "Probabilities")?) {
        let name = attribute(entry, "name")?;
        probabilities.insert(name, parse_probability(name, &element_text(entry)?)?)?;
    }

    let mut model = PraModel::new(probabilities);
    for entry in child_elements(child_element(root, "TopEvents")?) {
        model.add_top_event(attribute(entry, "name")?, &element_text(entry)?);
    }
    for entry in child_elements(child_element(root, "Scenarios")?) {
        model.add_scenario(
            attribute(entry, "name")?,
            attribute(entry, "Outcome")?,
            &element_text(entry)?,
        );
    }
    Ok(model)
}

/// Render the report as an indented XML document.
pub fn report_to_xml(report: &PraReport) -> Result<String, PraError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", None, None)))?;
    write_event(&mut writer, Event::Start(BytesStart::new("Output")))?;
    for result in report.results() {
        let mut scenario = BytesStart::new("Scenario");
        scenario.push_attribute(("name", result.name()));
        scenario.push_attribute(("Outcome", result.outcome()));
        write_event(&mut writer, Event::Start(scenario))?;
        write_text_element(&mut writer, "MinimalCutSets", &result.cut_sets().to_string())?;
        write_text_element(
            &mut writer,
            "Probability",
            &format_probability(result.probability()),
        )?;
        write_event(&mut writer, Event::End(BytesEnd::new("Scenario")))?;
    }
    write_event(&mut writer, Event::Start(BytesStart::new("OutcomeTotals")))?;
    for (outcome, total) in report.outcome_totals().iter() {
        let mut element = BytesStart::new("Outcome");
        element.push_attribute(("name", outcome));
        write_event(&mut writer, Event::Start(element))?;
        write_event(
            &mut writer,
            Event::Text(BytesText::new(&format_probability(total))),
        )?;
        write_event(&mut writer, Event::End(BytesEnd::new("Outcome")))?;
    }
    write_event(&mut writer, Event::End(BytesEnd::new("OutcomeTotals")))?;
    write_event(&mut writer, Event::End(BytesEnd::new("Output")))?;
    String::from_utf8(writer.into_inner()).map_err(|e| PraError::Xml(e.to_string()))
}

/// Write the report as an XML document to `path`.
pub fn write_report(report: &PraReport, path: &Path) -> Result<(), PraError> {
    let xml = report_to_xml(report)?;
    std::fs::write(path, xml).map_err(|source| PraError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Report written");
    Ok(())
}

/// The default report path for a model file: `dir/model.xml` becomes `dir/model_output.xml`.
pub fn report_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_output.xml", stem))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), PraError> {
    writer
        .write_event(event)
        .map_err(|e| PraError::Xml(e.to_string()))
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), PraError> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

/// **(internal)** The first child element of `node` with the given tag name.
fn child_element<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Result<Node<'a, 'input>, PraError> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == name)
        .ok_or_else(|| {
            PraError::MalformedInput(format!(
                "Element <{}> is missing in <{}>.",
                name,
                node.tag_name().name()
            ))
        })
}

/// **(internal)** All child elements of `node`, regardless of their tag name.
fn child_elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

fn attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str, PraError> {
    node.attribute(name).ok_or_else(|| {
        PraError::MalformedInput(format!(
            "Element <{}> has no `{}` attribute.",
            node.tag_name().name(),
            name
        ))
    })
}

/// **(internal)** The trimmed text content of `node`, which must not be empty.
///
/// All text children are joined, so comments inside the text are skipped. Nested elements
/// are rejected.
fn element_text(node: Node<'_, '_>) -> Result<String, PraError> {
    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            return Err(PraError::MalformedInput(format!(
                "Element <{}> cannot contain element <{}>.",
                node.tag_name().name(),
                child.tag_name().name()
            )));
        }
        if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }
    let text = text.trim();
    if text.is_empty() {
        Err(PraError::MalformedInput(format!(
            "Element <{}> has no text content.",
            node.tag_name().name()
        )))
    } else {
        Ok(text.to_string())
    }
}

fn parse_probability(name: &str, text: &str) -> Result<f64, PraError> {
    text.parse::<f64>().map_err(|_| {
        PraError::MalformedInput(format!(
            "Probability of `{}` is not a number: `{}`.",
            name, text
        ))
    })
}
