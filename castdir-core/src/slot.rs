//! Calendar slots: one reserved posting date each.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    #[default]
    Planned,
    InProgress,
}

/// A booked posting date, optionally pointing at the title idea planned
/// for it and, once promoted, the content item filling it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSlot {
    pub slot_date: NaiveDate,

    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_idea_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<Uuid>,
}

impl CalendarSlot {
    pub fn new(slot_date: NaiveDate) -> Self {
        CalendarSlot {
            slot_date,
            status: SlotStatus::Planned,
            title_idea_id: None,
            content_id: None,
        }
    }
}

/// Zip planned dates 1:1, in order, against generated title-idea ids.
/// Surplus dates become unassigned slots (more dates than titles); surplus
/// titles are simply not booked.
pub fn assign_titles(dates: &[NaiveDate], title_ids: &[Uuid]) -> Vec<CalendarSlot> {
    dates
        .iter()
        .enumerate()
        .map(|(i, &slot_date)| CalendarSlot {
            slot_date,
            status: SlotStatus::Planned,
            title_idea_id: title_ids.get(i).copied(),
            content_id: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: u32) -> Vec<NaiveDate> {
        (1..=n)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect()
    }

    #[test]
    fn test_surplus_dates_stay_unassigned() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let slots = assign_titles(&dates(4), &ids);

        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].title_idea_id, Some(ids[0]));
        assert_eq!(slots[1].title_idea_id, Some(ids[1]));
        assert_eq!(slots[2].title_idea_id, None);
        assert_eq!(slots[3].title_idea_id, None);
    }

    #[test]
    fn test_assignment_preserves_order() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let slots = assign_titles(&dates(3), &ids);

        for (slot, id) in slots.iter().zip(&ids) {
            assert_eq!(slot.title_idea_id, Some(*id));
            assert_eq!(slot.status, SlotStatus::Planned);
            assert_eq!(slot.content_id, None);
        }
    }
}
