//! Integration tests for link extraction against realistic page markup.

use harvester_core::{dedupe_links, extract_pdf_links, extract_unique_pdf_links};

const SDS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Safety Data Sheets</title><link href="/styles.pdf" rel="stylesheet"></head>
<body>
  <nav><a href="/">Home</a><a href="/pages/contact">Contact</a></nav>
  <table>
    <tr><td>Acetone</td><td><a href="https://cdn.example.com/sds/Acetone.pdf">SDS</a></td></tr>
    <tr><td>Ethanol</td><td><a href="https://cdn.example.com/sds/Ethanol.PDF?v=2">SDS</a></td></tr>
    <tr><td>Acetone (again)</td><td><a href="https://cdn.example.com/sds/Acetone.pdf">SDS</a></td></tr>
    <tr><td>Methanol</td><td><a href="/files/methanol.pdf#page=1">SDS</a></td></tr>
    <tr><td>Glycerin</td><td><a href="/files/glycerin.pdf">SDS</a></td></tr>
  </table>
  <img src="/logo.pdf">
  <p>Sheet download: <a HREF="/files/Sheet.PDF">x</a></p>
</body>
</html>"#;

#[test]
fn test_extract_from_sds_page_in_document_order() {
    let links = extract_pdf_links(SDS_PAGE);
    assert_eq!(
        links,
        vec![
            "https://cdn.example.com/sds/Acetone.pdf",
            "https://cdn.example.com/sds/Acetone.pdf",
            "/files/glycerin.pdf",
            "/files/Sheet.PDF",
        ]
    );
}

#[test]
fn test_extract_then_dedupe_has_no_repeats() {
    let unique = extract_unique_pdf_links(SDS_PAGE);
    assert_eq!(
        unique,
        vec![
            "https://cdn.example.com/sds/Acetone.pdf",
            "/files/glycerin.pdf",
            "/files/Sheet.PDF",
        ]
    );
    assert_eq!(unique, dedupe_links(extract_pdf_links(SDS_PAGE)));
}

#[test]
fn test_every_extracted_link_is_a_literal_href_ending_in_pdf() {
    for link in extract_pdf_links(SDS_PAGE) {
        assert!(link.to_lowercase().ends_with(".pdf"), "{link}");
        assert!(SDS_PAGE.contains(&format!("\"{link}\"")), "{link} not literal");
    }
}

#[test]
fn test_query_and_fragment_suffixes_are_not_pdf_links() {
    let html = r#"<a href="/a.pdf?dl=1">q</a><a href="/b.pdf#p2">f</a><a href="/c.pdf">ok</a>"#;
    assert_eq!(extract_pdf_links(html), vec!["/c.pdf"]);
}
