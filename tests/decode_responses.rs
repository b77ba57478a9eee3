//! Decoding tests over full, namespace-prefixed response documents as the
//! service emits them.

use linkshare_client::link_locator::LinkLocatorResult;
use linkshare_client::product_search::ProductSearchResult;

const MERCHANT_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ns1:getMerchByCategoryResponse xmlns:ns1="http://endpoint.linkservice.linkshare.com/">
    <ns1:return>
        <ns1:applicationStatus>approved</ns1:applicationStatus>
        <ns1:categories>1 2 5</ns1:categories>
        <ns1:mid>24164</ns1:mid>
        <ns1:name>Example Store</ns1:name>
        <ns1:offer>
            <ns1:alsoName>exmpl</ns1:alsoName>
            <ns1:commissionTerms>sale : 0-1000 4% | 1000 and above 5%</ns1:commissionTerms>
            <ns1:offerId>318181</ns1:offerId>
            <ns1:offerName>Default Offer</ns1:offerName>
        </ns1:offer>
    </ns1:return>
    <ns1:return>
        <ns1:applicationStatus>wait</ns1:applicationStatus>
        <ns1:mid>38291</ns1:mid>
        <ns1:name>Other Store</ns1:name>
    </ns1:return>
</ns1:getMerchByCategoryResponse>"#;

const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Fault xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
    <faultcode>soapenv:Server</faultcode>
    <faultstring>Internal server error</faultstring>
    <detail>
        <ns1:LinkLocFault xmlns:ns1="http://endpoint.linkservice.linkshare.com/">
            <ns1:message>Merchant data is temporarily unavailable</ns1:message>
        </ns1:LinkLocFault>
    </detail>
</soapenv:Fault>"#;

const SEARCH_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
    <TotalMatches>217</TotalMatches>
    <TotalPages>109</TotalPages>
    <PageNumber>1</PageNumber>
    <item>
        <mid>24164</mid>
        <merchantname>Example Store</merchantname>
        <linkid>10570</linkid>
        <createdon>2015-03-14/09:26:53</createdon>
        <sku>EX-1234</sku>
        <productname>Widget Deluxe</productname>
        <category>
            <primary>Home ~~ Kitchen</primary>
            <secondary>Gadgets</secondary>
        </category>
        <price currency="USD">19.99</price>
        <saleprice currency="USD">14.99</saleprice>
        <upccode>012345678905</upccode>
        <description>
            <short>A widget.</short>
            <long>A deluxe widget.</long>
        </description>
        <keywords>widget ~~ kitchen</keywords>
        <linkurl>https://click.linksynergy.com/link?id=abc</linkurl>
        <imageurl>https://example.com/widget.jpg</imageurl>
    </item>
    <item>
        <mid>24164</mid>
        <sku>EX-5678</sku>
        <productname>Widget Basic</productname>
        <price currency="USD">9.99</price>
    </item>
</result>"#;

const SEARCH_ERROR_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
    <Errors>
        <ErrorID>2</ErrorID>
        <ErrorText>Invalid token in request</ErrorText>
    </Errors>
</result>"#;

#[test]
fn test_namespaced_merchant_response_decodes() {
    let result = LinkLocatorResult::from_xml(MERCHANT_RESPONSE).unwrap();

    assert!(!result.has_fault());
    let merchants = result.merchants();
    assert_eq!(merchants.len(), 2);

    let first = &merchants[0];
    assert_eq!(first.id, Some(24164));
    assert_eq!(first.name.as_deref(), Some("Example Store"));
    assert_eq!(first.application_status.as_deref(), Some("approved"));
    assert_eq!(first.categories, vec![1, 2, 5]);

    let offer = first.offer.as_ref().unwrap();
    assert_eq!(offer.id, Some(318181));
    assert_eq!(offer.also_name.as_deref(), Some("exmpl"));
    let tiers = &offer.commission_terms["sale"];
    assert_eq!(tiers.len(), 2);
    assert_eq!(tiers[1].upper_bound, None);

    let second = &merchants[1];
    assert_eq!(second.id, Some(38291));
    assert!(second.offer.is_none());
    assert!(second.categories.is_empty());
}

#[test]
fn test_namespaced_fault_response_decodes() {
    let result = LinkLocatorResult::from_xml(FAULT_RESPONSE).unwrap();

    assert!(result.has_fault());
    assert!(result.merchants().is_empty());

    let fault = result.fault().unwrap();
    assert_eq!(fault.fault_string.as_deref(), Some("Internal server error"));
    assert_eq!(fault.message.as_deref(), Some("Merchant data is temporarily unavailable"));
}

#[test]
fn test_search_response_decodes_items_and_paging() {
    let result = ProductSearchResult::from_xml(SEARCH_RESPONSE).unwrap();

    assert!(!result.has_error());
    assert_eq!(result.total_matches(), Some(217));
    assert_eq!(result.total_pages(), Some(109));
    assert_eq!(result.page_number(), Some(1));

    let items = result.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].sku.as_deref(), Some("EX-1234"));
    assert_eq!(items[0].primary_categories, vec!["Home", "Kitchen"]);
    assert_eq!(items[0].retail_price, Some(19.99));
    assert!(items[0].created_on.is_some());

    assert_eq!(items[1].sku.as_deref(), Some("EX-5678"));
    assert_eq!(items[1].sale_price, None);
    assert!(items[1].keywords.is_empty());
}

#[test]
fn test_search_error_response_short_circuits() {
    let result = ProductSearchResult::from_xml(SEARCH_ERROR_RESPONSE).unwrap();

    assert!(result.has_error());
    let error = result.error().unwrap();
    assert_eq!(error.id, Some(2));
    assert_eq!(error.text.as_deref(), Some("Invalid token in request"));
    assert_eq!(result.total_matches(), None);
    assert!(result.items().is_empty());
}

#[test]
fn test_non_xml_body_is_rejected() {
    assert!(LinkLocatorResult::from_xml("<html><body>gateway timeout").is_err());
    assert!(ProductSearchResult::from_xml("").is_err());
}
