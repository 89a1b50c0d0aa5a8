//! 허용 목록 XML 코덱
//!
//! # 형식
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <allowed-dependencies>
//!   <dependency>
//!     <key>org.slf4j:slf4j-api</key>
//!     <versionRange>[1.7,2.0)</versionRange>
//!     <licenseId>MIT</licenseId>
//!   </dependency>
//! </allowed-dependencies>
//!
//! <licenses>
//!   <license>
//!     <id>MIT</id>
//!     <title>MIT License</title>
//!     <description><![CDATA[<p>Permission is hereby granted...</p>]]></description>
//!     <url>https://opensource.org/licenses/MIT</url>
//!     <sourceType>OPENSOURCE_NO_COPYLEFT</sourceType>
//!     <commercial>false</commercial>
//!   </license>
//! </licenses>
//! ```
//!
//! 라이선스 설명은 CDATA로 기록해 마크업을 그대로 보존합니다.
//! 루트 바로 아래에는 항목 요소만 허용하며, 항목의 알 수 없는 필드는 무시합니다.

use std::collections::HashMap;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::document::{AllowedDependency, DependencyDocument, License, LicenseDocument, SourceType};

/// XML 읽기/쓰기 실패
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct XmlError(pub String);

/// XML로 저장되는 허용 목록 문서
pub trait XmlDocument: Sized + Default {
    /// 루트 요소 이름
    const ROOT: &'static str;

    /// XML 텍스트를 파싱합니다. 공백뿐인 입력은 빈 문서입니다.
    fn from_xml(xml: &str) -> Result<Self, XmlError>;

    /// XML 텍스트로 직렬화합니다.
    fn to_xml(&self) -> Result<String, XmlError>;
}

impl XmlDocument for DependencyDocument {
    const ROOT: &'static str = "allowed-dependencies";

    fn from_xml(xml: &str) -> Result<Self, XmlError> {
        let dependencies = parse_items(xml, Self::ROOT, "dependency")?
            .into_iter()
            .map(|mut item| AllowedDependency {
                key: item.take("key"),
                version_range: item.take("versionRange"),
                license_id: item.take("licenseId"),
            })
            .collect();
        Ok(Self { dependencies })
    }

    fn to_xml(&self) -> Result<String, XmlError> {
        let mut out = XmlOut::new(Self::ROOT, self.dependencies.is_empty())?;
        for dep in &self.dependencies {
            out.start("dependency")?;
            out.text_field("key", &dep.key)?;
            out.text_field("versionRange", &dep.version_range)?;
            out.text_field("licenseId", &dep.license_id)?;
            out.end("dependency")?;
        }
        out.finish()
    }
}

impl XmlDocument for LicenseDocument {
    const ROOT: &'static str = "licenses";

    fn from_xml(xml: &str) -> Result<Self, XmlError> {
        let licenses = parse_items(xml, Self::ROOT, "license")?
            .into_iter()
            .map(|mut item| License {
                id: item.take("id"),
                title: item.take("title"),
                description: item.take("description"),
                url: item.take("url"),
                source_type: SourceType::from_stored(&item.take("sourceType")),
                commercial: item.take("commercial").trim().eq_ignore_ascii_case("true"),
            })
            .collect();
        Ok(Self { licenses })
    }

    fn to_xml(&self) -> Result<String, XmlError> {
        let mut out = XmlOut::new(Self::ROOT, self.licenses.is_empty())?;
        for license in &self.licenses {
            out.start("license")?;
            out.text_field("id", &license.id)?;
            out.text_field("title", &license.title)?;
            out.cdata_field("description", &license.description)?;
            out.text_field("url", &license.url)?;
            out.text_field("sourceType", license.source_type.as_str())?;
            out.text_field("commercial", if license.commercial { "true" } else { "false" })?;
            out.end("license")?;
        }
        out.finish()
    }
}

// --- 읽기 ---

#[derive(Default)]
struct Item {
    fields: HashMap<String, String>,
}

impl Item {
    fn take(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }
}

/// 루트 → 항목 → 필드 세 단계 문서를 읽습니다.
fn parse_items(xml: &str, root: &str, item: &str) -> Result<Vec<Item>, XmlError> {
    if xml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<Item> = None;
    let mut field: Option<(String, String)> = None;
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError(format!("XML parse error at {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = String::from_utf8_lossy(e.local_name().into_inner()).into_owned();
                match depth {
                    0 => {
                        if root_seen {
                            return Err(XmlError("multiple root elements".to_owned()));
                        }
                        if name != root {
                            return Err(XmlError(format!(
                                "unexpected root element '{name}', expected '{root}'"
                            )));
                        }
                        root_seen = true;
                    }
                    1 => {
                        if name != item {
                            return Err(XmlError(format!(
                                "unexpected element '{name}' in '{root}', expected '{item}'"
                            )));
                        }
                        if is_empty {
                            items.push(Item::default());
                        } else {
                            current = Some(Item::default());
                        }
                    }
                    2 => {
                        if is_empty {
                            if let Some(current) = current.as_mut() {
                                current.fields.insert(name, String::new());
                            }
                        } else {
                            field = Some((name, String::new()));
                        }
                    }
                    _ => {
                        return Err(XmlError(format!(
                            "unexpected nested element '{name}' inside a field"
                        )));
                    }
                }
                if !is_empty {
                    depth += 1;
                }
            }
            Event::Text(e) => {
                if let Some((_, value)) = field.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| XmlError(format!("invalid text content: {e}")))?;
                    value.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some((_, value)) = field.as_mut() {
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw)
                        .map_err(|e| XmlError(format!("invalid CDATA content: {e}")))?;
                    value.push_str(text);
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match depth {
                    2 => {
                        if let (Some((name, value)), Some(current)) = (field.take(), current.as_mut())
                        {
                            current.fields.insert(name, value);
                        }
                    }
                    1 => {
                        if let Some(done) = current.take() {
                            items.push(done);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(XmlError(format!("missing root element '{root}'")));
    }
    if depth != 0 {
        return Err(XmlError("unexpected end of document".to_owned()));
    }

    Ok(items)
}

// --- 쓰기 ---

struct XmlOut {
    writer: Writer<Vec<u8>>,
    root: &'static str,
    empty: bool,
}

impl XmlOut {
    fn new(root: &'static str, empty: bool) -> Result<Self, XmlError> {
        let mut out = Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
            root,
            empty,
        };
        out.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        if empty {
            out.write(Event::Empty(BytesStart::new(root)))?;
        } else {
            out.write(Event::Start(BytesStart::new(root)))?;
        }
        Ok(out)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), XmlError> {
        self.writer
            .write_event(event)
            .map_err(|e| XmlError(format!("XML write error: {e}")))
    }

    fn start(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text_field(&mut self, name: &str, value: &str) -> Result<(), XmlError> {
        if value.is_empty() {
            return self.write(Event::Empty(BytesStart::new(name)));
        }
        self.start(name)?;
        self.write(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    /// `]]>`가 포함된 값은 여러 CDATA 구간으로 나눠 씁니다.
    fn cdata_field(&mut self, name: &str, value: &str) -> Result<(), XmlError> {
        self.start(name)?;
        let mut rest = value;
        while let Some(pos) = rest.find("]]>") {
            self.write(Event::CData(BytesCData::new(&rest[..pos + 2])))?;
            rest = &rest[pos + 2..];
        }
        if !rest.is_empty() || value.is_empty() {
            self.write(Event::CData(BytesCData::new(rest)))?;
        }
        self.end(name)
    }

    fn finish(mut self) -> Result<String, XmlError> {
        if !self.empty {
            let root = self.root;
            self.end(root)?;
        }
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| XmlError(format!("XML output is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mit() -> License {
        License {
            id: "MIT".to_owned(),
            title: "MIT License".to_owned(),
            description: "<p>Permission is hereby granted & more</p>".to_owned(),
            url: "https://opensource.org/licenses/MIT".to_owned(),
            source_type: SourceType::OpensourceNoCopyleft,
            commercial: false,
        }
    }

    #[test]
    fn empty_documents_have_bare_root() {
        let xml = DependencyDocument::default().to_xml().unwrap();
        assert!(xml.contains("<allowed-dependencies/>"));
        let xml = LicenseDocument::default().to_xml().unwrap();
        assert!(xml.contains("<licenses/>"));
    }

    #[test]
    fn dependency_document_roundtrips() {
        let doc = DependencyDocument {
            dependencies: vec![
                AllowedDependency::new("org.slf4j:slf4j-api", "[1.7,2.0)", "MIT"),
                AllowedDependency::new("a&b", "<1.0", ""),
            ],
        };
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<key>a&amp;b</key>"));
        assert_eq!(DependencyDocument::from_xml(&xml).unwrap(), doc);
    }

    #[test]
    fn license_description_is_stored_as_cdata() {
        let doc = LicenseDocument {
            licenses: vec![mit()],
        };
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<![CDATA[<p>Permission is hereby granted & more</p>]]>"));
        assert_eq!(LicenseDocument::from_xml(&xml).unwrap(), doc);
    }

    #[test]
    fn description_with_cdata_terminator_survives() {
        let mut license = mit();
        license.description = "before ]]> after".to_owned();
        let doc = LicenseDocument {
            licenses: vec![license],
        };
        let parsed = LicenseDocument::from_xml(&doc.to_xml().unwrap()).unwrap();
        assert_eq!(parsed.licenses[0].description, "before ]]> after");
    }

    #[test]
    fn parses_hand_written_license_document() {
        let xml = r#"<licenses>
    <license>
        <id>GPL-3.0</id>
        <title>GNU General Public License v3</title>
        <description><![CDATA[Copyleft <b>strong</b>]]></description>
        <url>https://www.gnu.org/licenses/gpl-3.0.html</url>
        <sourceType></sourceType>
        <commercial>TRUE</commercial>
    </license>
</licenses>"#;
        let doc = LicenseDocument::from_xml(xml).unwrap();
        let license = &doc.licenses[0];
        assert_eq!(license.id, "GPL-3.0");
        assert_eq!(license.description, "Copyleft <b>strong</b>");
        assert_eq!(license.source_type, SourceType::OpensourceCopyleft);
        assert!(license.commercial);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let doc = DependencyDocument::from_xml(
            "<allowed-dependencies><dependency><key>k</key><versionRange/></dependency></allowed-dependencies>",
        )
        .unwrap();
        assert_eq!(doc.dependencies[0], AllowedDependency::new("k", "", ""));
    }

    #[test]
    fn blank_input_is_empty_document() {
        assert!(LicenseDocument::from_xml("  \n").unwrap().is_empty());
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = LicenseDocument::from_xml("<allowed-dependencies/>").unwrap_err();
        assert!(err.0.contains("unexpected root"));
    }

    #[test]
    fn unexpected_child_is_rejected() {
        let err = DependencyDocument::from_xml(
            "<allowed-dependencies><license/></allowed-dependencies>",
        )
        .unwrap_err();
        assert!(err.0.contains("license"));
    }

    #[test]
    fn truncated_document_is_rejected() {
        assert!(DependencyDocument::from_xml("<allowed-dependencies><dependency>").is_err());
    }
}
