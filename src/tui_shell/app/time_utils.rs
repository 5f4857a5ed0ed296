use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// `HH:MM:SSZ` for the status line; anything unparseable is shown verbatim.
pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    match OffsetDateTime::parse(ts, &Rfc3339) {
        Ok(dt) => format!("{:02}:{:02}:{:02}Z", dt.hour(), dt.minute(), dt.second()),
        Err(_) => ts.to_string(),
    }
}

pub(in crate::tui_shell) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
