use serde_json::Value;

use crate::engine::{ApprovalReport, CheckReason, DirectoryCheck};

pub fn build_report(report: &ApprovalReport) -> Value {
    let checked: Vec<Value> = report.checks.iter().map(check_json).collect();

    serde_json::json!({
        "verdict": report.verdict.as_str(),
        "approved": report.verdict.is_approved(),
        "request_id": report.request_id,
        "evaluated_at": chrono::Utc::now().to_rfc3339(),
        "checked": checked,
        "blocked_by": report.blocked_by.as_ref().map(check_json),
    })
}

fn check_json(check: &DirectoryCheck) -> Value {
    let res = &check.resolution;
    serde_json::json!({
        "directory": check.directory.to_string(),
        "reason": check.reason,
        "declared_at": res.declared_at.as_ref().map(|d| d.to_string()),
        "owners": res.owners,
        "matched": res.matched,
        "authorized": res.authorized,
    })
}

/// The verdict line, optionally followed by one line per checked directory.
pub fn format_text(report: &ApprovalReport, verbose: bool) -> String {
    let mut out = String::new();
    out.push_str(report.verdict.as_str());
    out.push('\n');
    if !verbose {
        return out;
    }

    for check in &report.checks {
        let res = &check.resolution;
        let status = if res.authorized { "ok" } else { "BLOCKED" };
        let why = match &check.reason {
            CheckReason::Changed { file } => format!("changed {file}"),
            CheckReason::DependentOf { directory } => format!("depends on {directory}"),
        };
        let owners = match &res.declared_at {
            None => "unrestricted".to_string(),
            Some(at) => format!("owners [{}] from {}", res.owners.join(", "), at),
        };
        out.push_str(&format!(
            "  {status:<7} {dir} ({why}; {owners})\n",
            dir = check.directory
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir_id::DirId;
    use crate::engine::Verdict;
    use crate::owners::OwnerResolution;

    fn sample() -> ApprovalReport {
        let ok = DirectoryCheck {
            directory: DirId::new("src/x"),
            reason: CheckReason::Changed {
                file: "src/x/file.txt".into(),
            },
            resolution: OwnerResolution {
                directory: DirId::new("src/x"),
                declared_at: Some(DirId::new("src/x")),
                owners: vec!["alice".into()],
                matched: vec!["alice".into()],
                authorized: true,
            },
        };
        let blocked = DirectoryCheck {
            directory: DirId::new("src/y"),
            reason: CheckReason::DependentOf {
                directory: DirId::new("src/x"),
            },
            resolution: OwnerResolution {
                directory: DirId::new("src/y"),
                declared_at: Some(DirId::new("src/y")),
                owners: vec!["carol".into()],
                matched: vec![],
                authorized: false,
            },
        };
        ApprovalReport {
            request_id: "req-1".into(),
            verdict: Verdict::Insufficient,
            checks: vec![ok, blocked.clone()],
            blocked_by: Some(blocked),
        }
    }

    #[test]
    fn test_format_text_plain_is_verdict_only() {
        assert_eq!(format_text(&sample(), false), "Insufficient Approvals\n");
    }

    #[test]
    fn test_format_text_verbose_lists_checks() {
        let text = format_text(&sample(), true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Insufficient Approvals");
        assert!(lines[1].contains("ok") && lines[1].contains("changed src/x/file.txt"));
        assert!(lines[2].contains("BLOCKED") && lines[2].contains("depends on src/x"));
        assert!(lines[2].contains("owners [carol] from src/y"));
    }

    #[test]
    fn test_build_report_json() {
        let v = build_report(&sample());
        assert_eq!(v["verdict"], "Insufficient Approvals");
        assert_eq!(v["approved"], false);
        assert_eq!(v["checked"].as_array().map(Vec::len), Some(2));
        assert_eq!(v["blocked_by"]["directory"], "src/y");
        assert_eq!(v["blocked_by"]["reason"]["kind"], "dependent_of");
        assert_eq!(v["blocked_by"]["reason"]["directory"], "src/x");
        assert!(v["evaluated_at"].as_str().is_some());
    }
}
