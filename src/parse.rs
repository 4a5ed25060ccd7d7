//! Turning user input into event dates and display times.

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};

/// A parsed "when" input. `time` is set only when the input named one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct When {
    pub date: NaiveDate,
    pub time: Option<String>,
}

/// Parse an ISO date (`2025-11-28`) or a natural language date/time
/// ("tomorrow 3pm", "fri", "march 20").
pub fn parse_when(input: &str) -> Result<When> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(When { date, time: None });
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;

    let time = has_time_component(input).then(|| display_time(&dt));
    Ok(When {
        date: dt.date(),
        time,
    })
}

/// Date only; any time in the input is dropped.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_when(input).map(|w| w.date)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The current local time as the event form shows it, e.g. "3:05 PM".
pub fn now_display_time() -> String {
    display_time(&Local::now().naive_local())
}

fn display_time(dt: &NaiveDateTime) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// Spell out the short day and month names fuzzydate rejects ("fri", "sept").
fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(expand_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn expand_word(word: &str) -> &str {
    match word {
        "mon" => "monday",
        "tue" | "tues" => "tuesday",
        "wed" => "wednesday",
        "thu" | "thur" | "thurs" => "thursday",
        "fri" => "friday",
        "sat" => "saturday",
        "sun" => "sunday",
        "jan" => "january",
        "feb" => "february",
        "mar" => "march",
        "apr" => "april",
        "jun" => "june",
        "jul" => "july",
        "aug" => "august",
        "sep" | "sept" => "september",
        "oct" => "october",
        "nov" => "november",
        "dec" => "december",
        other => other,
    }
}

/// "9", "15:00" or "10:30".
fn is_clock(word: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match word.split_once(':') {
        Some((hours, minutes)) => digits(hours) && digits(minutes),
        None => digits(word),
    }
}

/// Whether the input names a time of day, in the forms the event form
/// shows ("10:00 AM") or types naturally ("3pm", "15:00", "noon", "at 9").
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    words.iter().enumerate().any(|(i, &word)| {
        let prev = i.checked_sub(1).map(|p| words[p]);
        let meridiem = word.strip_suffix("am").or_else(|| word.strip_suffix("pm"));

        match word {
            "noon" | "midnight" => true,
            "am" | "pm" => prev.is_some_and(is_clock),
            _ if meridiem.is_some_and(is_clock) => true,
            _ if word.contains(':') => is_clock(word),
            _ => prev == Some("at") && is_clock(word),
        }
    })
}

/// Split a shell line into arguments, honouring single and double quotes.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        anyhow::bail!("Unclosed quote");
    }
    if in_word {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    // --- has_time_component ---

    #[test]
    fn time_component_am_pm() {
        assert!(has_time_component("tomorrow 6pm"));
        assert!(has_time_component("friday 11am"));
        assert!(has_time_component("sat 3 pm"));
        assert!(has_time_component("9AM"));
    }

    #[test]
    fn time_component_colon_and_keywords() {
        assert!(has_time_component("tomorrow 15:00"));
        assert!(has_time_component("tomorrow noon"));
        assert!(has_time_component("friday at 15"));
        assert!(has_time_component("at 9"));
        assert!(has_time_component("nov 28 10:00 AM"));
        assert!(has_time_component("dec 3 10:30pm"));
    }

    #[test]
    fn no_time_component() {
        assert!(!has_time_component("tomorrow"));
        assert!(!has_time_component("march 20"));
        assert!(!has_time_component("december"));
        assert!(!has_time_component("camp"));
        assert!(!has_time_component("pm"));
        assert!(!has_time_component("2025-11-28"));
    }

    // --- expand_abbreviations ---

    #[test]
    fn expand_day_and_month_abbreviations() {
        assert_eq!(expand_abbreviations("sat 3pm"), "saturday 3pm");
        assert_eq!(expand_abbreviations("Tues 10am"), "tuesday 10am");
        assert_eq!(expand_abbreviations("sept 5"), "september 5");
        assert_eq!(expand_abbreviations("next friday"), "next friday");
    }

    // --- parse_when ---

    #[test]
    fn iso_date_parses_without_time() {
        let when = parse_when("2025-11-28").unwrap();
        assert_eq!(when.date, NaiveDate::from_ymd_opt(2025, 11, 28).unwrap());
        assert_eq!(when.time, None);
    }

    #[test]
    fn natural_date_with_time_keeps_time() {
        let when = parse_when("tomorrow 3pm").unwrap();
        assert_eq!(when.time.as_deref(), Some("3:00 PM"));
    }

    #[test]
    fn natural_date_without_time() {
        let when = parse_when("march 20").unwrap();
        assert_eq!(when.date.month(), 3);
        assert_eq!(when.date.day(), 20);
        assert_eq!(when.time, None);
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(parse_when("not a date at all xyz").is_err());
    }

    // --- split_args ---

    #[test]
    fn split_args_honours_quotes() {
        assert_eq!(
            split_args(r#"new "Team lunch" --time '1:00 PM'"#).unwrap(),
            vec!["new", "Team lunch", "--time", "1:00 PM"]
        );
    }

    #[test]
    fn split_args_keeps_empty_quoted_argument() {
        assert_eq!(
            split_args(r#"edit 3 --description """#).unwrap(),
            vec!["edit", "3", "--description", ""]
        );
    }

    #[test]
    fn split_args_rejects_unclosed_quote() {
        assert!(split_args("new \"oops").is_err());
        assert!(split_args("   ").unwrap().is_empty());
    }
}
