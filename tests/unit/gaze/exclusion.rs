use super::*;

#[test]
fn reads_ids_and_strips_trailing_whitespace() {
    let list = ExclusionList::from_reader("P001\r\nP002  \n\n   \nP003\n".as_bytes()).unwrap();
    assert_eq!(list.ids(), &["P001", "P002", "P003"]);
    assert!(list.contains("P002"));
    assert!(!list.contains("P002  "));
    assert!(!list.contains(""));
}

#[test]
fn blank_line_does_not_exclude_short_ids() {
    use crate::gaze::sample::strip_id_suffix;

    let list = ExclusionList::from_reader("P1\n\n".as_bytes()).unwrap();
    assert_eq!(strip_id_suffix("ab"), "");
    assert!(!list.contains(strip_id_suffix("ab")));
}

#[test]
fn extend_keeps_order_and_duplicates() {
    let mut a = ExclusionList::from_reader("P1\nP2\n".as_bytes()).unwrap();
    let b = ExclusionList::from_reader("P2\nP3\n".as_bytes()).unwrap();
    a.extend(b);
    assert_eq!(a.ids(), &["P1", "P2", "P2", "P3"]);
    assert_eq!(a.len(), 4);
}

#[test]
fn write_round_trips_through_reader() {
    let list = ExclusionList::from_reader("X1\nX2\n".as_bytes()).unwrap();
    let mut buf = Vec::new();
    list.write_to(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "X1\nX2\n");
}
