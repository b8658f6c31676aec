//! One line per failed warning, suitable for editors and grep

use typegate_core::report::render_short;
use typegate_core::RunReport;

pub fn lines(report: &RunReport, list_unused: bool) -> Vec<String> {
    let mut lines: Vec<String> = report
        .result
        .iter()
        .flat_map(|result| result.failed.iter())
        .map(render_short)
        .collect();
    if list_unused {
        lines.extend(
            report
                .unused_patterns
                .iter()
                .map(|pattern| format!("unused pattern: {}", pattern)),
        );
    }
    lines
}

pub fn print_report(report: &RunReport, list_unused: bool) {
    for line in lines(report, list_unused) {
        println!("{}", line);
    }
}
