use super::*;

fn sample(subid: &str, stimulus: &str, t: i64) -> GazeSample {
    GazeSample {
        subid: subid.to_owned(),
        stimulus: stimulus.to_owned(),
        t,
        win_x: 400.0,
        win_y: 300.0,
        window_width: 800.0,
        window_height: 600.0,
    }
}

fn fixture() -> GazeDataset {
    [
        sample("babyA_1", "FAM_LL", 0),
        sample("babyA_1", "FAM_LL", 66),
        sample("babyB_2", "FAM_LL", 0),
        sample("adultC_3", "FAM_LL", 0),
        sample("adultC_3", "FAM_LR", 0),
        sample("babyD_4", "FAM_LR", 66),
    ]
    .into_iter()
    .collect()
}

#[test]
fn exclusion_is_a_set_difference_on_stripped_ids() {
    let mut ds = fixture();
    let input_len = ds.len();
    let list = ExclusionList::from_reader("babyA\nbabyD_4\nnobody\n".as_bytes()).unwrap();

    let expected_removed = ds
        .samples()
        .iter()
        .filter(|s| list.contains(s.participant_id()))
        .count();
    let removed = ds.apply_exclusions(&list);

    assert_eq!(removed, expected_removed);
    assert_eq!(removed, 2);
    assert_eq!(ds.len(), input_len - removed);
    // Raw ids never match: "babyD_4" is listed unstripped and so excludes nothing.
    assert!(ds.participants().contains("babyD"));
    assert!(
        ds.participants()
            .iter()
            .all(|p| !list.contains(p))
    );
}

#[test]
fn empty_exclusion_list_keeps_everything() {
    let mut ds = fixture();
    assert_eq!(ds.apply_exclusions(&ExclusionList::new()), 0);
    assert_eq!(ds.len(), 6);
}

#[test]
fn select_filters_by_stimulus_and_group_substring() {
    let ds = fixture();

    let all = ds.select("FAM_LL", "");
    assert_eq!(all.len(), 4);
    assert_eq!(all.bucket_count(), 2);
    assert_eq!(all.rows_at(0).len(), 3);
    assert_eq!(all.rows_at(66).len(), 1);
    assert!(all.rows_at(133).is_empty());

    let babies = ds.select("FAM_LL", "baby");
    assert_eq!(babies.len(), 3);
    assert_eq!(babies.group(), "baby");
    assert_eq!(babies.stimulus(), "FAM_LL");

    assert!(ds.select("FAM_RR", "").is_empty());
}

#[test]
fn duplicate_rows_in_one_bucket_are_kept() {
    let ds: GazeDataset = [sample("p1_x", "S", 0), sample("p1_x", "S", 0)]
        .into_iter()
        .collect();
    assert_eq!(ds.select("S", "").rows_at(0).len(), 2);
}

#[test]
fn group_filter_ignores_the_id_suffix() {
    let ds: GazeDataset = [sample("babyA_1", "S", 0), sample("babyB_2", "S", 0)]
        .into_iter()
        .collect();
    assert!(ds.select("S", "_1").is_empty());
    assert_eq!(ds.select("S", "A").len(), 1);
    assert_eq!(ds.select("S", "baby").len(), 2);
}
