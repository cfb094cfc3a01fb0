use crate::models::{CardType, ListItem};
use crate::render::types::{AppointmentRow, CardBody, DateBadge};

use super::empty;

const MONTHS_PT: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

pub fn body(items: &[ListItem]) -> CardBody {
    if items.is_empty() {
        return empty(CardType::NextAppointments);
    }
    CardBody::Appointments {
        rows: items
            .iter()
            .map(|item| AppointmentRow {
                title: item.primary.clone(),
                doctor: item.secondary.clone(),
                date: item.meta_value(&["data", "date"]).and_then(date_badge),
                time: item
                    .meta_value(&["horário", "horario", "hora", "time"])
                    .map(str::to_string),
                notes: item.tags.clone(),
            })
            .collect(),
    }
}

/// Split `dd/mm[/yyyy]` into a day + Portuguese month abbreviation. A month
/// segment outside 1–12 is shown as written.
pub fn date_badge(date: &str) -> Option<DateBadge> {
    let mut parts = date.split('/').map(str::trim);
    let day = parts.next().filter(|d| !d.is_empty())?;
    let month = parts.next().unwrap_or_default();
    let month = match month.parse::<usize>() {
        Ok(m @ 1..=12) => MONTHS_PT[m - 1].to_string(),
        _ => month.to_string(),
    };
    Some(DateBadge {
        day: day.to_string(),
        month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_maps_to_portuguese_abbreviation() {
        let badge = date_badge("15/03/2025").unwrap();
        assert_eq!(badge.day, "15");
        assert_eq!(badge.month, "MAR");
        assert_eq!(date_badge("1/12").unwrap().month, "DEZ");
    }

    #[test]
    fn odd_month_is_kept_verbatim() {
        assert_eq!(date_badge("10/13/2025").unwrap().month, "13");
        assert_eq!(date_badge("amanhã").unwrap().month, "");
    }

    #[test]
    fn missing_date_omits_badge() {
        let items = vec![ListItem::new("Retorno").with_secondary(Some("Dra. Lima".into()))];
        let CardBody::Appointments { rows } = body(&items) else {
            panic!("expected appointments");
        };
        assert!(rows[0].date.is_none());
        assert_eq!(rows[0].doctor.as_deref(), Some("Dra. Lima"));
    }

    #[test]
    fn legacy_metadata_feeds_date_and_time() {
        let items = vec![ListItem::new("Retorno")
            .with_meta("Data", Some("05/08/2025".into()))
            .with_meta("Horário", Some("14:30".into()))];
        let CardBody::Appointments { rows } = body(&items) else {
            panic!("expected appointments");
        };
        assert_eq!(rows[0].date.as_ref().map(|d| d.month.as_str()), Some("AGO"));
        assert_eq!(rows[0].time.as_deref(), Some("14:30"));
    }
}
