#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_max_one_with_long_string() {
    assert_eq!(truncate("ab", 1), "…");
}

// ── group_thousands / format_money ────────────────────────────

#[test]
fn test_group_thousands_basic() {
    assert_eq!(group_thousands(dec!(1234.56)), "1,234.56");
    assert_eq!(group_thousands(dec!(999.99)), "999.99");
    assert_eq!(group_thousands(dec!(0)), "0.00");
}

#[test]
fn test_group_thousands_large() {
    assert_eq!(group_thousands(dec!(1234567.89)), "1,234,567.89");
    assert_eq!(group_thousands(dec!(10000000)), "10,000,000.00");
}

#[test]
fn test_group_thousands_pads_decimals() {
    assert_eq!(group_thousands(dec!(1.5)), "1.50");
    assert_eq!(group_thousands(dec!(5)), "5.00");
}

#[test]
fn test_group_thousands_negative() {
    assert_eq!(group_thousands(dec!(-42.50)), "-42.50");
}

#[test]
fn test_format_money_symbol_after_sign() {
    assert_eq!(format_money(dec!(5000), "₹"), "₹5,000.00");
    assert_eq!(format_money(dec!(-99999.01), "Rs. "), "-Rs. 99,999.01");
}

// ── months ────────────────────────────────────────────────────

#[test]
fn test_normalize_month_full() {
    assert_eq!(normalize_month("2024-03", "2020"), Some("2024-03".into()));
    assert_eq!(normalize_month("2024-3", "2020"), Some("2024-03".into()));
}

#[test]
fn test_normalize_month_short_uses_current_year() {
    assert_eq!(normalize_month("7", "2025"), Some("2025-07".into()));
    assert_eq!(normalize_month("11", "2025"), Some("2025-11".into()));
}

#[test]
fn test_normalize_month_rejects_garbage() {
    assert_eq!(normalize_month("2024-13", "2024"), None);
    assert_eq!(normalize_month("march", "2024"), None);
    assert_eq!(normalize_month("", "2024"), None);
}

#[test]
fn test_shift_month_wraps_years() {
    assert_eq!(shift_month("2024-12", true), Some("2025-01".into()));
    assert_eq!(shift_month("2024-01", false), Some("2023-12".into()));
    assert_eq!(shift_month("bogus", true), None);
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (4, 2);
    scroll_down(&mut index, &mut scroll, 5, 3);
    assert_eq!((index, scroll), (4, 2));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}
