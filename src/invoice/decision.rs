use crate::invoice::InvoiceRecord;
use crate::invoice::naming::target_base_name;

/// What to do with one parsed invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Tracked name is neither issuer nor recipient.
    NotMatched,
    /// Tracked name found, but the file cannot be renamed.
    Skip(SkipReason),
    Rename {
        counterparty: String,
        base_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The other party has no `Nombre`, or it is blank.
    NoCounterpartyName,
    /// The voucher has no `Total`, or it is blank.
    MissingTotal,
}

/// Name of the party that is not `tracked_name`.
///
/// Issuer match selects the recipient; anything else selects the issuer.
pub fn counterparty<'a>(record: &'a InvoiceRecord, tracked_name: &str) -> Option<&'a str> {
    if record.issuer_name.as_deref() == Some(tracked_name) {
        record.recipient_name.as_deref()
    } else {
        record.issuer_name.as_deref()
    }
}

/// Decide whether and how `record` should be renamed for `tracked_name`.
pub fn decide(record: &InvoiceRecord, tracked_name: &str) -> Decision {
    if !record.mentions(tracked_name) {
        return Decision::NotMatched;
    }

    let Some(counterparty) = counterparty(record, tracked_name)
        .map(str::trim)
        .filter(|name| !name.is_empty())
    else {
        return Decision::Skip(SkipReason::NoCounterpartyName);
    };

    // Blank totals are missing; otherwise the literal text goes into the name as is.
    let Some(total) = record
        .total_amount
        .as_deref()
        .filter(|total| !total.trim().is_empty())
    else {
        return Decision::Skip(SkipReason::MissingTotal);
    };

    Decision::Rename {
        counterparty: counterparty.to_owned(),
        base_name: target_base_name(total, counterparty),
    }
}
