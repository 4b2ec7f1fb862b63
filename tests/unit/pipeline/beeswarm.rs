use super::*;

#[test]
fn output_names_follow_the_dispersion_flag() {
    let sd = BeeswarmJob::new("FAM_LL", "", true);
    let plain = BeeswarmJob::new("FAM_LL", "", false);
    assert_eq!(sd.output_file_name(), "FAM_LL_beeswarm_sd_.mp4");
    assert_eq!(plain.output_file_name(), "FAM_LL_beeswarm_.mp4");
    assert_eq!(sd.intermediate_file_name(), "FAM_LL_beeswarm_tobedeleted_.mp4");
    assert_eq!(
        sd.intermediate_file_name(),
        plain.intermediate_file_name()
    );
}

#[test]
fn group_is_appended_to_both_names() {
    let job = BeeswarmJob::new("FAM_RR", "baby", true);
    let dir = Path::new("out");
    assert_eq!(
        job.output_path(dir),
        PathBuf::from("out/FAM_RR_beeswarm_sd_baby.mp4")
    );
    assert_eq!(
        job.intermediate_path(dir),
        PathBuf::from("out/FAM_RR_beeswarm_tobedeleted_baby.mp4")
    );
}

#[test]
fn stages_display_in_lowercase() {
    let names: Vec<String> = [
        PipelineStage::PreprocessVideo,
        PipelineStage::StreamFrames,
        PipelineStage::Finalize,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(names, ["preprocess", "stream", "finalize"]);
}

#[test]
fn job_display_names_all_parts() {
    let job = BeeswarmJob::new("FAM_LR", "adult", false);
    assert_eq!(job.to_string(), "FAM_LR group=\"adult\" dispersion=false");
}
