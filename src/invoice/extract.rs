use roxmltree::{Document, Node};

const ISSUER_SUFFIX: &str = "Emisor";
const RECIPIENT_SUFFIX: &str = "Receptor";
const VOUCHER_SUFFIX: &str = "Comprobante";
const NAME_ATTRIBUTE: &str = "Nombre";
const TOTAL_ATTRIBUTE: &str = "Total";

/// Attributes pulled out of a CFDI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFields {
    pub issuer_name: Option<String>,
    pub recipient_name: Option<String>,
    pub total_amount: Option<String>,
}

/// Extract issuer/recipient names and the voucher total from invoice XML.
///
/// Elements are matched on the suffix of their local name, so `cfdi:Emisor`,
/// a default-namespaced `Emisor` and a bare `Emisor` all count. When several
/// elements qualify the last one in document order wins. Elements lacking the
/// attribute are ignored rather than clearing an earlier value.
pub fn extract_fields(xml: &str) -> Result<InvoiceFields, String> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let document = Document::parse(xml).map_err(|error| format!("XML parse error: {error}"))?;

    let mut fields = InvoiceFields::default();
    for node in document.descendants().filter(Node::is_element) {
        let local_name = node.tag_name().name();

        if local_name.ends_with(ISSUER_SUFFIX) {
            if let Some(name) = node.attribute(NAME_ATTRIBUTE) {
                fields.issuer_name = Some(name.to_owned());
            }
        } else if local_name.ends_with(RECIPIENT_SUFFIX)
            && let Some(name) = node.attribute(NAME_ATTRIBUTE)
        {
            fields.recipient_name = Some(name.to_owned());
        }

        if local_name.ends_with(VOUCHER_SUFFIX)
            && let Some(total) = node.attribute(TOTAL_ATTRIBUTE)
        {
            fields.total_amount = Some(total.to_owned());
        }
    }

    Ok(fields)
}
