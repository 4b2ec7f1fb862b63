use super::*;

fn parse(csv_text: &str) -> Vec<Result<GazeRecord, csv::Error>> {
    csv::Reader::from_reader(csv_text.as_bytes())
        .deserialize::<GazeRecord>()
        .collect()
}

#[test]
fn strip_removes_two_trailing_chars() {
    assert_eq!(strip_id_suffix("P017_a"), "P017");
    assert_eq!(strip_id_suffix("lab1-P2xy"), "lab1-P2");
    assert_eq!(strip_id_suffix("ab"), "");
    assert_eq!(strip_id_suffix("a"), "");
    assert_eq!(strip_id_suffix(""), "");
    assert_eq!(strip_id_suffix("Pé_ü"), "Pé");
}

#[test]
fn record_parses_and_ignores_extra_columns() {
    let rows = parse(
        ",subid,stimulus,t,windowHeight,windowWidth,x,y,lab\n\
         0,P001_1,FAM_LL,66.0,600,800,400.5,300,labA\n",
    );
    let rec = rows.into_iter().next().unwrap().unwrap();
    let s = rec.into_sample().unwrap();
    assert_eq!(s.participant_id(), "P001");
    assert_eq!(s.stimulus, "FAM_LL");
    assert_eq!(s.t, 66);
    assert_eq!(s.win_x, 400.5);
    assert_eq!(s.window_width, 800.0);
}

#[test]
fn missing_gaze_is_not_a_sample() {
    let rows = parse(
        "subid,stimulus,t,windowHeight,windowWidth,x,y\n\
         P001_1,FAM_LL,0,600,800,,300\n\
         P001_1,FAM_LL,66,600,800,NaN,300\n\
         P001_1,FAM_LL,133,0,800,1,1\n",
    );
    for row in rows {
        assert!(row.unwrap().into_sample().is_none());
    }
}

#[test]
fn non_numeric_timestamp_is_an_error() {
    let rows = parse("subid,stimulus,t,windowHeight,windowWidth,x,y\nP,S,abc,1,1,1,1\n");
    assert!(rows[0].is_err());
}
