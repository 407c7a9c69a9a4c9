//! Grouping rendered alerts into bounded outbound messages

use crate::models::{AlertGroup, OutboundMessage, RenderedUnit};

/// Header line shared by every message produced for a group
pub fn header(group: &AlertGroup) -> String {
    format!("=== Alert: {} - {} ===", group.receiver, group.alert_name())
}

/// Split units into messages of at most `capacity` units, preserving order.
///
/// An empty input still yields one message with no units. A capacity of
/// zero is treated as one.
pub fn batch(header: &str, units: Vec<RenderedUnit>, capacity: usize) -> Vec<OutboundMessage> {
    if units.is_empty() {
        return vec![OutboundMessage::new(header, Vec::new())];
    }

    let capacity = capacity.max(1);
    let mut messages = Vec::with_capacity(units.len().div_ceil(capacity));
    let mut units = units.into_iter().peekable();

    while units.peek().is_some() {
        let chunk: Vec<RenderedUnit> = units.by_ref().take(capacity).collect();
        messages.push(OutboundMessage::new(header, chunk));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmbedColor, MAX_UNITS_PER_MESSAGE};
    use proptest::prelude::*;

    fn units(count: usize) -> Vec<RenderedUnit> {
        (0..count)
            .map(|i| RenderedUnit {
                title: format!("alert {i}"),
                color: EmbedColor::Red,
                body: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_header() {
        let group: AlertGroup = serde_json::from_str(
            r#"{"receiver": "ops", "status": "firing", "alerts": [],
                "groupLabels": {"alertname": "HighLoad"}}"#,
        )
        .unwrap();

        assert_eq!(header(&group), "=== Alert: ops - HighLoad ===");
    }

    #[test]
    fn test_empty_group_yields_one_message() {
        let messages = batch("h", Vec::new(), MAX_UNITS_PER_MESSAGE);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].units.is_empty());
        assert_eq!(messages[0].content, "h");
    }

    #[test]
    fn test_twenty_five_units() {
        let messages = batch("h", units(25), MAX_UNITS_PER_MESSAGE);
        let sizes: Vec<usize> = messages.iter().map(|m| m.units.len()).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        assert!(messages.iter().all(|m| m.content == "h"));
    }

    #[test]
    fn test_exactly_full_message() {
        let messages = batch("h", units(10), MAX_UNITS_PER_MESSAGE);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].units.len(), 10);
    }

    #[test]
    fn test_zero_capacity() {
        let messages = batch("h", units(3), 0);
        assert_eq!(messages.len(), 3);
    }

    proptest! {
        #[test]
        fn test_batching_preserves_units(count in 0usize..100, capacity in 1usize..20) {
            let input = units(count);
            let messages = batch("header", input.clone(), capacity);

            let expected = if count == 0 { 1 } else { count.div_ceil(capacity) };
            prop_assert_eq!(messages.len(), expected);
            prop_assert!(messages.iter().all(|m| m.units.len() <= capacity));
            prop_assert!(messages.iter().all(|m| m.content == "header"));

            let flattened: Vec<RenderedUnit> =
                messages.into_iter().flat_map(|m| m.units).collect();
            prop_assert_eq!(flattened, input);
        }
    }
}
