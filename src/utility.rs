use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar on stderr. Hidden automatically when stderr is not a
/// terminal.
pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(
            " {msg} {wide_bar} {human_pos}/{human_len} estimated remaining: {eta_precise}",
        )
        .expect("progress bar template is valid"),
    );
    bar
}
