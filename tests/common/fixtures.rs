//! Static record corpora used across harnesses.
//!
//! Each fixture is one harvested record exactly as a repository would return
//! it over OAI-PMH: an OAI `record` wrapper with a `header` and a `metadata`
//! payload in the source schema.

/// DataCite namespace, as it appears in qualified tree keys.
pub const DATACITE: &str = "http://datacite.org/schema/kernel-4";

/// Qualified key helper for the DataCite namespace.
pub fn datacite_key(name: &str) -> String {
    format!("{DATACITE}:{name}")
}

/// A complete DataCite record: DOI identifier, one language-tagged title,
/// one creator with a name type, one subject, an abstract, and a year.
pub const DATACITE_SINGLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/">
  <header>
    <identifier>oai:repo.example:1</identifier>
    <datestamp>2024-01-15</datestamp>
  </header>
  <metadata>
    <resource xmlns="http://datacite.org/schema/kernel-4">
      <identifier identifierType="DOI">10.17026/dans-2ab</identifier>
      <creators>
        <creator>
          <creatorName nameType="Personal">Doe, Jane</creatorName>
        </creator>
      </creators>
      <titles>
        <title xml:lang="en">A study of things</title>
      </titles>
      <publisher>DANS</publisher>
      <publicationYear>2019</publicationYear>
      <subjects>
        <subject xml:lang="en">things</subject>
      </subjects>
      <descriptions>
        <description descriptionType="Abstract" xml:lang="en">All about things.</description>
      </descriptions>
    </resource>
  </metadata>
</record>
"#;

/// A DataCite record with a URL identifier and repeated titles/subjects
/// (the sequence-producing cardinality).
pub const DATACITE_MULTI: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/">
  <header>
    <identifier>oai:repo.example:42</identifier>
  </header>
  <metadata>
    <resource xmlns="http://datacite.org/schema/kernel-4">
      <identifier identifierType="URL">https://repo.example/datasets/42</identifier>
      <titles>
        <title xml:lang="hr">Naslov</title>
        <title xml:lang="en" titleType="TranslatedTitle">A title</title>
      </titles>
      <subjects>
        <subject>alpha</subject>
        <subject>beta</subject>
      </subjects>
      <publicationYear>2021</publicationYear>
    </resource>
  </metadata>
</record>
"#;

/// A DataCite record whose `publicationYear` carries an attribute, turning
/// the schema-guaranteed bare scalar into a structured value. Normalization
/// must fail this record, not patch it.
pub const DATACITE_BAD_YEAR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/">
  <header>
    <identifier>oai:repo.example:bad</identifier>
  </header>
  <metadata>
    <resource xmlns="http://datacite.org/schema/kernel-4">
      <titles>
        <title>Fine title</title>
      </titles>
      <publicationYear calendar="gregorian">2020</publicationYear>
    </resource>
  </metadata>
</record>
"#;

/// A Dublin Core (`oai_dc`) record with a DOI among its identifiers.
pub const DC_RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/">
  <header>
    <identifier>oai:repo.example:dc-7</identifier>
  </header>
  <metadata>
    <oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/"
               xmlns:dc="http://purl.org/dc/elements/1.1/">
      <dc:title xml:lang="en">Survey data</dc:title>
      <dc:creator>Doe, Jane</dc:creator>
      <dc:subject>surveys</dc:subject>
      <dc:description>About surveys.</dc:description>
      <dc:publisher>Repo</dc:publisher>
      <dc:date>2020-03-01</dc:date>
      <dc:identifier>https://doi.org/10.5072/dc-7</dc:identifier>
      <dc:identifier>https://repo.example/dc-7</dc:identifier>
    </oai_dc:dc>
  </metadata>
</record>
"#;

/// A DDI 2.5 codebook record with the study title repeated verbatim (the
/// duplication the DDI mapper is expected to drop) and the DOI under an
/// `agency` attribute.
pub const DDI_RECORD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<record xmlns="http://www.openarchives.org/OAI/2.0/">
  <header>
    <identifier>oai:repo.example:ddi-3</identifier>
  </header>
  <metadata>
    <codeBook xmlns="ddi:codebook:2_5">
      <stdyDscr>
        <citation>
          <titlStmt>
            <titl xml:lang="en">Election study</titl>
            <titl xml:lang="en">Election study</titl>
            <IDNo agency="DOI">10.5072/ddi-3</IDNo>
          </titlStmt>
          <rspStmt>
            <AuthEnty>Roe, Richard</AuthEnty>
          </rspStmt>
          <distStmt>
            <distrbtr>Data Archive</distrbtr>
            <distDate date="2018-06-01">1 June 2018</distDate>
          </distStmt>
        </citation>
        <stdyInfo>
          <subject>
            <topcClas>elections</topcClas>
          </subject>
          <abstract xml:lang="en">Voting behaviour.</abstract>
        </stdyInfo>
      </stdyDscr>
    </codeBook>
  </metadata>
</record>
"#;

/// Not XML at all, as far as any parser is concerned.
pub const MALFORMED_XML: &str = "<record><metadata></record>";

/// Generate `n` small DataCite records for throughput-style tests.
pub fn datacite_corpus(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            format!(
                r#"<record xmlns="http://www.openarchives.org/OAI/2.0/">
  <header><identifier>oai:repo.example:{i}</identifier></header>
  <metadata>
    <resource xmlns="http://datacite.org/schema/kernel-4">
      <identifier identifierType="DOI">10.5072/corpus-{i}</identifier>
      <titles><title xml:lang="en">Record {i}</title></titles>
      <publicationYear>20{:02}</publicationYear>
    </resource>
  </metadata>
</record>"#,
                i % 100,
            )
        })
        .collect()
}
