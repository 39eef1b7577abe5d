//! Outbound handoff payload.
//!
//! Builds the prefilled plain-text message and the messaging-channel deep
//! link a shopper sends to the sales team. The channel itself (and whatever
//! protocol it speaks) is outside this subsystem.

use rusty_money::{Money, iso::Currency};
use url::Url;

use crate::domain::shared_carts::models::{CustomerInfo, SnapshotItem};

/// Compose the itemized handoff message.
///
/// One line per item (`name (qty x) - price`), the formatted subtotal, the
/// customer's delivery date and notes when present, and the share URL.
#[must_use]
pub fn compose_message(
    items: &[SnapshotItem],
    customer: Option<&CustomerInfo>,
    subtotal: u64,
    share_url: &str,
    currency: &'static Currency,
) -> String {
    let mut message = String::from("Hello! I would like to place an order\n\n*My cart:*\n");

    for item in items {
        message.push_str(&format!(
            "- {} ({}x) - {}\n",
            item.product_name,
            item.quantity,
            format_minor(item.price, currency)
        ));
    }

    message.push_str(&format!("\n*Total:* {}\n", format_minor(subtotal, currency)));

    if let Some(date) = customer.and_then(|c| c.delivery_date.as_deref()) {
        message.push_str(&format!("*Preferred date:* {date}\n"));
    }

    if let Some(notes) = customer.and_then(|c| c.notes.as_deref()) {
        message.push_str(&format!("*Notes:* {notes}\n"));
    }

    message.push_str(&format!("\n*Full cart:*\n{share_url}\n\nCan you help me finish the order?"));

    message
}

/// Build the channel deep link with the message percent-encoded into the
/// `text` query parameter.
///
/// # Errors
///
/// Returns an error when `channel_base` is not a valid absolute URL.
pub fn deep_link(channel_base: &str, message: &str) -> Result<Url, url::ParseError> {
    let mut link = Url::parse(channel_base)?;

    link.query_pairs_mut().append_pair("text", message);

    Ok(link)
}

fn format_minor(amount: u64, currency: &'static Currency) -> String {
    // Minor-unit amounts always fit a cart; saturate rather than fail on
    // absurd input.
    let amount = i64::try_from(amount).unwrap_or(i64::MAX);

    Money::from_minor(amount, currency).to_string()
}
