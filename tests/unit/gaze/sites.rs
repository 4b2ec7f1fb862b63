use super::*;

const HEADER: &str = "subid,stimulus,t,windowHeight,windowWidth,x,y\n";

fn write(path: &Path, text: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn config_in(root: &Path) -> BeeswarmConfig {
    BeeswarmConfig {
        lab_data_dir: root.join("lab_data"),
        output_dir: root.join("output"),
        fallback_dir: root.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn multi_site_merges_in_name_order_and_writes_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(tmp.path());
    let lab = &cfg.lab_data_dir;

    write(
        &lab.join("b_site").join(&cfg.data_csv),
        &format!("{HEADER}P2_x,FAM_LL,0,600,800,1,1\n"),
    );
    write(
        &lab.join("a_site").join(&cfg.data_csv),
        &format!("{HEADER}P1_x,FAM_LL,0,600,800,1,1\nP9_x,FAM_LL,0,600,800,1,1\n"),
    );
    write(&lab.join("a_site").join(&cfg.exclusion_file), "P9\n");
    write(&lab.join("stray.txt"), "not a site");

    let loaded = load_gaze_data(&cfg).unwrap();
    let DeploymentMode::MultiSite {
        sites,
        merged_csv,
        merged_exclusions,
    } = &loaded.mode
    else {
        panic!("expected multi-site mode");
    };
    assert_eq!(sites.len(), 2);
    assert!(sites[0].ends_with("a_site"));
    assert_eq!(loaded.rows_read, 3);
    assert_eq!(loaded.rows_excluded, 1);

    let ids: Vec<&str> = loaded
        .dataset
        .samples()
        .iter()
        .map(|s| s.subid.as_str())
        .collect();
    assert_eq!(ids, vec!["P1_x", "P2_x"]);

    let merged = std::fs::read_to_string(merged_csv).unwrap();
    assert_eq!(merged.lines().count(), 4);
    assert!(merged.starts_with("subid,stimulus"));
    assert_eq!(std::fs::read_to_string(merged_exclusions).unwrap(), "P9\n");
}

#[test]
fn later_sites_are_remapped_onto_first_header() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(tmp.path());
    let lab = &cfg.lab_data_dir;

    write(
        &lab.join("a").join(&cfg.data_csv),
        &format!("{HEADER}P1_x,S,0,600,800,1,2\n"),
    );
    write(
        &lab.join("b").join(&cfg.data_csv),
        "y,x,extra,windowWidth,windowHeight,t,stimulus,subid\n4,3,zz,800,600,66,S,P2_x\n",
    );

    let loaded = load_gaze_data(&cfg).unwrap();
    assert_eq!(loaded.dataset.len(), 2);
    let merged = std::fs::read_to_string(cfg.output_dir.join(&cfg.data_csv)).unwrap();
    let last = merged.lines().last().unwrap();
    assert_eq!(last, "P2_x,S,66,600,800,3,4");
}

#[test]
fn site_without_csv_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(tmp.path());
    std::fs::create_dir_all(cfg.lab_data_dir.join("empty_site")).unwrap();
    let err = load_gaze_data(&cfg).unwrap_err();
    assert!(matches!(err, BeeswarmError::Data(_)));
}

#[test]
fn falls_back_to_single_file_without_writing_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_in(tmp.path());
    write(
        &tmp.path().join(&cfg.data_csv),
        &format!("{HEADER}P1_x,S,0,600,800,1,1\nP2_x,S,0,600,800,,1\n"),
    );

    let loaded = load_gaze_data(&cfg).unwrap();
    assert!(matches!(loaded.mode, DeploymentMode::SingleFile { .. }));
    assert_eq!(loaded.rows_read, 2);
    assert_eq!(loaded.rows_skipped, 1);
    assert_eq!(loaded.dataset.len(), 1);
    assert!(!cfg.output_dir.exists());
}

#[test]
fn missing_everything_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let err = load_gaze_data(&config_in(tmp.path())).unwrap_err();
    assert!(err.to_string().contains("no gaze data"));
}
