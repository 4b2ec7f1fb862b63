use super::*;

#[test]
fn default_plan_is_stimulus_then_dispersion() {
    let jobs = plan_jobs(&BeeswarmConfig::default());
    let names: Vec<String> = jobs.iter().map(BeeswarmJob::output_file_name).collect();
    assert_eq!(
        names,
        [
            "FAM_LL_beeswarm_sd_.mp4",
            "FAM_LL_beeswarm_.mp4",
            "FAM_LR_beeswarm_sd_.mp4",
            "FAM_LR_beeswarm_.mp4",
            "FAM_RL_beeswarm_sd_.mp4",
            "FAM_RL_beeswarm_.mp4",
            "FAM_RR_beeswarm_sd_.mp4",
            "FAM_RR_beeswarm_.mp4",
        ]
    );
}

#[test]
fn groups_vary_fastest() {
    let cfg = BeeswarmConfig {
        stimuli: vec!["S".to_owned()],
        groups: vec!["a".to_owned(), "b".to_owned()],
        dispersion: vec![false, true],
        ..BeeswarmConfig::default()
    };
    let jobs = plan_jobs(&cfg);
    let got: Vec<(&str, bool)> = jobs
        .iter()
        .map(|j| (j.group.as_str(), j.show_dispersion))
        .collect();
    assert_eq!(got, [("a", false), ("b", false), ("a", true), ("b", true)]);
}

#[test]
fn empty_axes_plan_nothing() {
    let cfg = BeeswarmConfig {
        groups: Vec::new(),
        ..BeeswarmConfig::default()
    };
    assert!(plan_jobs(&cfg).is_empty());
}
