use contracts::domain::a002_order::aggregate::Order;

use crate::domain::a002_order::record::status_meta;
use crate::shared::date_utils::{format_datetime_opt, format_slot};

/// Сумма в рупиях с индийской группировкой разрядов: ₹1,23,456.50
pub fn format_rupees(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut groups: Vec<&str> = Vec::new();
    let (mut head, tail) = whole.split_at(whole.len().saturating_sub(3));
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head);
    }
    groups.reverse();
    groups.push(tail);

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}₹{}.{}", sign, groups.join(","), fraction)
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

/// Строки карточки заказа "подпись: значение" в порядке показа
pub fn detail_lines(order: &Order) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Service", order.service_name()),
        ("Store", order.store_name()),
        ("Status", status_meta(&order.status_code()).0),
    ];

    let pickup = if order.is_walk_in {
        format_datetime_opt(order.created_at.as_deref())
    } else {
        format_slot(order.pickup_start().as_deref(), order.pickup_end().as_deref())
    };
    lines.push(("Pickup", pickup));
    lines.push(("Express Order", yes_no(order.is_express)));
    lines.push(("Walk-In Order", yes_no(order.is_walk_in)));

    if order.status_code() == "delivered" {
        if let Some(delivered_at) = order.delivered_at.as_deref() {
            lines.push(("Delivered At", format_datetime_opt(Some(delivered_at))));
        }
    }

    let total = order.total_amount();
    if total > 0.0 {
        lines.push(("Total Amount", format_rupees(total)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupees_grouping() {
        assert_eq!(format_rupees(0.0), "₹0.00");
        assert_eq!(format_rupees(999.5), "₹999.50");
        assert_eq!(format_rupees(1234.0), "₹1,234.00");
        assert_eq!(format_rupees(123456.5), "₹1,23,456.50");
        assert_eq!(format_rupees(12345678.0), "₹1,23,45,678.00");
    }

    #[test]
    fn test_detail_lines_for_delivered_walk_in() {
        let order: Order = serde_json::from_str(
            r#"{ "id": 7, "store": { "name": "Central" }, "order_status": "delivered",
                 "is_walk_in": true, "created_at": "2024-03-15T10:00:00Z",
                 "delivered_at": "2024-03-16T18:30:00Z",
                 "items": [{ "service": { "name": "Wash" }, "total_amount": "250" }] }"#,
        )
        .unwrap();
        let lines = detail_lines(&order);
        let labels: Vec<&str> = lines.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "Service",
                "Store",
                "Status",
                "Pickup",
                "Express Order",
                "Walk-In Order",
                "Delivered At",
                "Total Amount"
            ]
        );
        assert_eq!(lines[0].1, "Wash");
        assert_eq!(lines[2].1, "Delivered");
        assert_eq!(lines[3].1, "15.03.2024 10:00");
        assert_eq!(lines[5].1, "Yes");
        assert_eq!(lines[7].1, "₹250.00");
    }

    #[test]
    fn test_detail_lines_without_amount_or_delivery() {
        let order: Order = serde_json::from_str(r#"{ "id": 8, "status": "pending" }"#).unwrap();
        let lines = detail_lines(&order);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3].1, "Not scheduled");
        assert_eq!(lines[4].1, "No");
    }
}
