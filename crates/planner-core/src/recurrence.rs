//! Recurring-task expansion.
//!
//! A recurring template is materialised eagerly at creation time: a fixed
//! table maps each cadence to a period and an instance count (about three
//! months either way), and [`expand`] produces that many sibling rows up
//! front. There is no lazy generate-on-read engine and no background
//! extension of the horizon.

use chrono::Days;

use crate::task::NewTask;

/// A recurrence cadence from the fixed expansion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
  Daily,
  Weekly,
}

impl Cadence {
  /// Parse a stored cadence tag. Anything outside the table (e.g.
  /// `"monthly"`) returns `None` and the template is simply not expanded.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "daily" => Some(Cadence::Daily),
      "weekly" => Some(Cadence::Weekly),
      _ => None,
    }
  }

  /// Days between consecutive instances.
  pub fn period_days(self) -> u64 {
    match self {
      Cadence::Daily => 1,
      Cadence::Weekly => 7,
    }
  }

  /// Number of generated siblings. The template itself is not counted.
  pub fn instance_count(self) -> u64 {
    match self {
      Cadence::Daily => 90,
      Cadence::Weekly => 12,
    }
  }
}

/// Produce the sibling rows for a recurring template.
///
/// Returns an empty vec when the template is not recurring, its cadence is
/// not in the table, or it has no due date — such templates are stored
/// alone, which is not an error. The template's group id must already be
/// assigned; siblings copy it verbatim. Sibling `i` is due `period × i`
/// after the template; completion flag, tracked duration, and creation
/// instant are left to the store's per-row defaults rather than copied.
///
/// Expansion stops early if a sibling's date would fall past the end of
/// the supported calendar range.
pub fn expand(template: &NewTask) -> Vec<NewTask> {
  if !template.is_recurring {
    return Vec::new();
  }
  let Some(cadence) =
    template.recurrence_type.as_deref().and_then(Cadence::parse)
  else {
    return Vec::new();
  };
  let Some(due) = template.due_date else {
    return Vec::new();
  };

  (1..=cadence.instance_count())
    .map_while(|i| due.checked_add_days(Days::new(cadence.period_days() * i)))
    .map(|sibling_due| {
      let mut sibling = template.clone();
      sibling.due_date = Some(sibling_due);
      sibling
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn template(recurrence_type: Option<&str>) -> NewTask {
    NewTask {
      title:               "journal review".to_string(),
      description:         Some("weekly notes".to_string()),
      is_recurring:        recurrence_type.is_some(),
      due_date:            NaiveDate::from_ymd_opt(2025, 3, 1),
      start_time:          None,
      end_time:            None,
      recurrence_type:     recurrence_type.map(str::to_owned),
      recurrence_group_id: recurrence_type.map(|_| "group-1".to_string()),
    }
  }

  #[test]
  fn daily_produces_ninety_siblings_one_day_apart() {
    let t = template(Some("daily"));
    let siblings = expand(&t);
    assert_eq!(siblings.len(), 90);

    let due = t.due_date.unwrap();
    for (i, sibling) in siblings.iter().enumerate() {
      let expected = due + Days::new(i as u64 + 1);
      assert_eq!(sibling.due_date, Some(expected));
      assert_eq!(sibling.recurrence_group_id.as_deref(), Some("group-1"));
    }
  }

  #[test]
  fn weekly_produces_twelve_siblings_seven_days_apart() {
    let t = template(Some("weekly"));
    let siblings = expand(&t);
    assert_eq!(siblings.len(), 12);

    let due = t.due_date.unwrap();
    assert_eq!(siblings[0].due_date, Some(due + Days::new(7)));
    assert_eq!(siblings[11].due_date, Some(due + Days::new(84)));
  }

  #[test]
  fn non_recurring_is_not_expanded() {
    assert!(expand(&template(None)).is_empty());
  }

  #[test]
  fn unknown_cadence_is_not_expanded() {
    assert!(expand(&template(Some("monthly"))).is_empty());
  }

  #[test]
  fn expansion_stops_at_the_calendar_limit() {
    let mut t = template(Some("daily"));
    t.due_date = NaiveDate::MAX.checked_sub_days(Days::new(5));
    let siblings = expand(&t);
    assert_eq!(siblings.len(), 5);
    assert_eq!(siblings.last().unwrap().due_date, Some(NaiveDate::MAX));
  }

  #[test]
  fn recurring_without_due_date_is_not_expanded() {
    let mut t = template(Some("daily"));
    t.due_date = None;
    assert!(expand(&t).is_empty());
  }

  #[test]
  fn siblings_copy_template_fields() {
    let t = template(Some("weekly"));
    let siblings = expand(&t);
    for sibling in &siblings {
      assert_eq!(sibling.title, t.title);
      assert_eq!(sibling.description, t.description);
      assert!(sibling.is_recurring);
      assert_eq!(sibling.recurrence_type.as_deref(), Some("weekly"));
    }
  }
}
