//! Maven descriptor (`pom.xml`) and `maven-metadata.xml` parsing.
//!
//! Both walk the document with the quick-xml event API and track the path of
//! local element names, so namespace prefixes never matter.

use quick_xml::events::Event;
use quick_xml::Reader;

/// One `<dependency>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

/// The parts of a POM the checker cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomDescriptor {
    pub packaging: Option<String>,
    pub modules: Vec<String>,
    pub dependencies: Vec<PomDependency>,
    /// Every `licenses/license/name`, in document order.
    pub licenses: Vec<String>,
}

impl PomDescriptor {
    pub fn parse(xml: &str) -> Result<Self, quick_xml::Error> {
        let mut pom = PomDescriptor::default();
        let mut current: Option<PomDependency> = None;

        walk(xml, |event, path| {
            let n = path.len();
            match event {
                XmlEvent::Start if path[n - 1] == "dependency" => {
                    current = Some(PomDependency {
                        group_id: String::new(),
                        artifact_id: String::new(),
                        version: None,
                    });
                }
                XmlEvent::End if path[n - 1] == "dependency" => {
                    if let Some(dep) = current.take() {
                        if !dep.group_id.is_empty() && !dep.artifact_id.is_empty() {
                            pom.dependencies.push(dep);
                        }
                    }
                }
                XmlEvent::Text(text) if n >= 2 && path[n - 2] == "dependency" => {
                    if let Some(dep) = current.as_mut() {
                        match path[n - 1].as_str() {
                            "groupId" => dep.group_id = text.to_string(),
                            "artifactId" => dep.artifact_id = text.to_string(),
                            "version" => dep.version = Some(text.to_string()),
                            _ => {}
                        }
                    }
                }
                XmlEvent::Text(text) => {
                    if path_is(path, &["project", "packaging"]) {
                        pom.packaging = Some(text.to_string());
                    } else if path_is(path, &["project", "modules", "module"]) {
                        pom.modules.push(text.to_string());
                    } else if path_ends_with(path, &["licenses", "license", "name"]) {
                        pom.licenses.push(text.to_string());
                    }
                }
                _ => {}
            }
        })?;

        Ok(pom)
    }

    /// An aggregator only lists sub-projects: `pom` packaging plus at least one module.
    pub fn is_aggregator(&self) -> bool {
        self.packaging.as_deref().map(str::trim) == Some("pom") && !self.modules.is_empty()
    }
}

/// Read the newest version from a `maven-metadata.xml` document.
///
/// Uses `versioning/latest`, falling back to `versioning/release`.
pub fn latest_version_from_metadata(xml: &str) -> Result<Option<String>, quick_xml::Error> {
    let mut latest = None;
    let mut release = None;

    walk(xml, |event, path| {
        if let XmlEvent::Text(text) = event {
            if path_ends_with(path, &["versioning", "latest"]) {
                latest = Some(text.to_string());
            } else if path_ends_with(path, &["versioning", "release"]) {
                release = Some(text.to_string());
            }
        }
    })?;

    Ok(latest.or(release))
}

fn path_is(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn path_ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a == b)
}

enum XmlEvent<'a> {
    Start,
    /// Non-empty, trimmed, unescaped text.
    Text(&'a str),
    End,
}

/// Drive the event loop, handing each event to `on_event` together with the
/// path of local element names leading to it (the element itself included).
fn walk<F>(xml: &str, mut on_event: F) -> Result<(), quick_xml::Error>
where
    F: FnMut(XmlEvent<'_>, &[String]),
{
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                path.push(String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned());
                on_event(XmlEvent::Start, &path);
            }
            Event::Text(ref e) if !path.is_empty() => {
                let text = e.unescape()?;
                let text = text.trim();
                if !text.is_empty() {
                    on_event(XmlEvent::Text(text), &path);
                }
            }
            Event::End(_) => {
                if !path.is_empty() {
                    on_event(XmlEvent::End, &path);
                    path.pop();
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
