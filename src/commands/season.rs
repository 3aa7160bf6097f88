//! The season command handler.

use crate::args::SeasonArgs;
use crate::commands::Out;
use crate::{Ledger, Result};
use chrono::{DateTime, Local, TimeZone};

/// Shows the season start date, or moves it when `--set` is given. The season boundary
/// feeds the dashboard and the `season` listing window.
pub async fn season(ledger: &Ledger, args: SeasonArgs) -> Result<Out<DateTime<Local>>> {
    if let Some(date) = args.set() {
        let start = match date.and_hms_opt(0, 0, 0) {
            Some(naive) => Local
                .from_local_datetime(&naive)
                .earliest()
                .unwrap_or_else(Local::now),
            None => Local::now(),
        };
        ledger.set_season_start(start).await;
        let message = format!("Season start set to {}", start.format("%Y-%m-%d"));
        return Ok(Out::new(message, start));
    }

    let start = ledger.season_start().await;
    let message = format!("Season started {}", start.format("%Y-%m-%d"));
    Ok(Out::new(message, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use chrono::{Datelike, NaiveDate};

    #[tokio::test]
    async fn test_default_is_january_first() {
        let env = TestEnv::new().await;
        let out = season(env.ledger(), SeasonArgs::new(None)).await.unwrap();
        let start = *out.structure().unwrap();
        assert_eq!(start.month(), 1);
        assert_eq!(start.day(), 1);
        assert_eq!(start.year(), Local::now().year());
    }

    #[tokio::test]
    async fn test_set_then_show() {
        let env = TestEnv::new().await;
        let ledger = env.ledger();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let set = season(ledger, SeasonArgs::new(Some(date))).await.unwrap();
        assert!(set.message().contains("2024-06-01"));

        let shown = season(ledger, SeasonArgs::new(None)).await.unwrap();
        assert_eq!(shown.structure().unwrap().date_naive(), date);
    }
}
