//! PubMed XML parser using quick-xml
//!
//! Streaming parser for the EFetch `PubmedArticleSet` format. Captures
//! only the fields the store persists; abstract segments and the raw
//! publication year are kept unnormalized for extraction to handle.

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// One parsed PubMed record, prior to field extraction
#[derive(Debug, Default)]
pub struct PubmedRecord {
    pub pmid: String,
    pub title: Option<String>,
    /// Abstract segments in document order (structured abstracts carry one
    /// segment per labeled section)
    pub abstract_segments: Vec<String>,
    pub journal_title: Option<String>,
    /// Raw PubDate year text, not yet parsed to an integer
    pub pub_year: Option<String>,
    /// Cross-reference identifiers with their IdType tags
    pub article_ids: Vec<ArticleId>,
}

/// Entry of the `ArticleIdList` cross-reference block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleId {
    pub id_type: String,
    pub value: String,
}

/// Parse all PubMed articles from an EFetch XML response.
///
/// Articles that fail to parse individually are logged and skipped, so a
/// single malformed record does not abort the batch.
pub fn parse_pubmed_xml(xml: &str) -> Result<Vec<PubmedRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"PubmedArticle" => {
                match parse_article(&mut reader) {
                    Ok(record) => records.push(record),
                    Err(e) => log::debug!("Failed to parse article: {}", e),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e).context("XML parse error"),
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

fn parse_article(reader: &mut Reader<&[u8]>) -> Result<PubmedRecord> {
    let mut record = PubmedRecord::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"MedlineCitation" => parse_medline_citation(reader, &mut record)?,
                b"PubmedData" => parse_pubmed_data(reader, &mut record)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(record)
}

fn parse_medline_citation(reader: &mut Reader<&[u8]>, record: &mut PubmedRecord) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" => {
                    // MedlineCitation-level PMID only; CommentsCorrections
                    // blocks nest their own
                    if record.pmid.is_empty() {
                        record.pmid = read_text(reader)?;
                    }
                }
                b"Article" => parse_article_element(reader, record)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"MedlineCitation" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_article_element(reader: &mut Reader<&[u8]>, record: &mut PubmedRecord) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Journal" => parse_journal(reader, record)?,
                b"ArticleTitle" => {
                    record.title = Some(read_text_content(reader, b"ArticleTitle")?)
                }
                b"Abstract" => parse_abstract(reader, record)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Article" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_journal(reader: &mut Reader<&[u8]>, record: &mut PubmedRecord) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Title" => record.journal_title = Some(read_text(reader)?),
                b"PubDate" => parse_pub_date(reader, record)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Journal" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_pub_date(reader: &mut Reader<&[u8]>, record: &mut PubmedRecord) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"Year" => {
                record.pub_year = Some(read_text(reader)?);
            }
            Event::End(e) if e.name().as_ref() == b"PubDate" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_abstract(reader: &mut Reader<&[u8]>, record: &mut PubmedRecord) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"AbstractText" => {
                record
                    .abstract_segments
                    .push(read_text_content(reader, b"AbstractText")?);
            }
            Event::End(e) if e.name().as_ref() == b"Abstract" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_pubmed_data(reader: &mut Reader<&[u8]>, record: &mut PubmedRecord) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"ArticleIdList" => {
                parse_article_id_list(reader, record)?;
            }
            Event::End(e) if e.name().as_ref() == b"PubmedData" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_article_id_list(reader: &mut Reader<&[u8]>, record: &mut PubmedRecord) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"ArticleId" => {
                let mut id_type = String::new();
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"IdType" {
                        id_type = String::from_utf8_lossy(&attr.value).to_string();
                    }
                }
                let value = read_text(reader)?;
                record.article_ids.push(ArticleId { id_type, value });
            }
            Event::End(e) if e.name().as_ref() == b"ArticleIdList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Read text content until next end tag
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::End(_) => break,
            Event::Start(_) => {
                // Nested markup like <i> or <sub>
                text.push_str(&read_text(reader)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Read text content of a specific element, handling nested tags
fn read_text_content(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>12345</PMID>
      <Article>
        <Journal>
          <Title>Journal of Testing</Title>
          <JournalIssue>
            <PubDate>
              <Year>2024</Year>
              <Month>06</Month>
            </PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Test Article</ArticleTitle>
        <Abstract>
          <AbstractText>This is the abstract.</AbstractText>
        </Abstract>
      </Article>
    </MedlineCitation>
    <PubmedData>
      <ArticleIdList>
        <ArticleId IdType="doi">10.1234/test</ArticleId>
        <ArticleId IdType="pmc">PMC1234567</ArticleId>
      </ArticleIdList>
    </PubmedData>
  </PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn parse_basic_article() {
        let records = parse_pubmed_xml(SAMPLE_XML).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.pmid, "12345");
        assert_eq!(record.title, Some("Test Article".to_string()));
        assert_eq!(record.abstract_segments, vec!["This is the abstract."]);
        assert_eq!(record.journal_title, Some("Journal of Testing".to_string()));
        assert_eq!(record.pub_year, Some("2024".to_string()));
    }

    #[test]
    fn parse_article_ids_with_types() {
        let records = parse_pubmed_xml(SAMPLE_XML).unwrap();
        let record = &records[0];

        assert_eq!(record.article_ids.len(), 2);
        assert_eq!(record.article_ids[0], ArticleId {
            id_type: "doi".to_string(),
            value: "10.1234/test".to_string(),
        });
        assert_eq!(record.article_ids[1], ArticleId {
            id_type: "pmc".to_string(),
            value: "PMC1234567".to_string(),
        });
    }

    #[test]
    fn structured_abstract_keeps_segments() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>99999</PMID>
      <Article>
        <Abstract>
          <AbstractText Label="BACKGROUND">This is the background.</AbstractText>
          <AbstractText Label="METHODS">These are the methods.</AbstractText>
        </Abstract>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = parse_pubmed_xml(xml).unwrap();
        assert_eq!(records[0].abstract_segments, vec![
            "This is the background.",
            "These are the methods.",
        ]);
    }

    #[test]
    fn parse_minimal_article() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>11111</PMID>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = parse_pubmed_xml(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pmid, "11111");
        assert!(records[0].title.is_none());
        assert!(records[0].abstract_segments.is_empty());
        assert!(records[0].pub_year.is_none());
        assert!(records[0].article_ids.is_empty());
    }

    #[test]
    fn parse_empty_set() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
</PubmedArticleSet>"#;

        let records = parse_pubmed_xml(xml).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn parse_multiple_articles_in_order() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>1</PMID>
      <Article><ArticleTitle>First Article</ArticleTitle></Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>2</PMID>
      <Article><ArticleTitle>Second Article</ArticleTitle></Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = parse_pubmed_xml(xml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pmid, "1");
        assert_eq!(records[1].pmid, "2");
        assert_eq!(records[1].title, Some("Second Article".to_string()));
    }

    #[test]
    fn nested_markup_in_title() {
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>3</PMID>
      <Article>
        <ArticleTitle>Role of <i>E. coli</i> in infection</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = parse_pubmed_xml(xml).unwrap();
        assert_eq!(
            records[0].title,
            Some("Role of E. coli in infection".to_string())
        );
    }

    #[test]
    fn medline_date_yields_no_year() {
        // Journals without a plain <Year> use <MedlineDate>; the raw year
        // stays unset and extraction maps it to null
        let xml = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>4</PMID>
      <Article>
        <Journal>
          <Title>Old Journal</Title>
          <JournalIssue>
            <PubDate>
              <MedlineDate>1998 Dec-1999 Jan</MedlineDate>
            </PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Undated</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let records = parse_pubmed_xml(xml).unwrap();
        assert!(records[0].pub_year.is_none());
        assert_eq!(records[0].journal_title, Some("Old Journal".to_string()));
    }
}
