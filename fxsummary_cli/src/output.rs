use anyhow::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use fxsummary_lib::{DailyRecord, Summary};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}', expected table or json",
                other
            )),
        }
    }
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Change %")]
    pct_change: String,
}

fn build_day_rows(days: &[DailyRecord]) -> Vec<DayRow> {
    days.iter()
        .map(|day| DayRow {
            date: day.date.to_string(),
            rate: format!("{:.4}", day.rate),
            pct_change: day
                .pct_change
                .map(|pct| format!("{:+.4}", pct))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn print_summary(summary: &Summary, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Table => {
            println!(
                "{}->{} {}..{}",
                summary.base, summary.target, summary.start_date, summary.end_date
            );
            if let Some(days) = &summary.days {
                let mut table = Table::new(build_day_rows(days));
                table.with(Style::rounded());
                println!("{}", table);
            }
            let totals = &summary.totals;
            println!("start rate:   {:.4}", totals.start_rate);
            println!("end rate:     {:.4}", totals.end_rate);
            match totals.total_pct_change {
                Some(pct) => println!("total change: {:+.4}%", pct),
                None => println!("total change: -"),
            }
            println!("mean rate:    {:.6}", totals.mean_rate);
        }
    }
    Ok(())
}
