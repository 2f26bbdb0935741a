use chrono::NaiveDate;

use crate::db::operations::{count_milestones, insert_milestone, insert_profile, MilestoneInput};
use crate::db::Database;
use crate::engine::LearnerProfile;

struct DefaultMilestone {
    name: &'static str,
    target: (i32, u32, u32),
    target_words: i64,
}

const DEFAULT_MILESTONES: &[DefaultMilestone] = &[
    DefaultMilestone {
        name: "Winter Goal",
        target: (2025, 12, 31),
        target_words: 365,
    },
    DefaultMilestone {
        name: "Spring Goal",
        target: (2026, 3, 31),
        target_words: 455,
    },
    DefaultMilestone {
        name: "Summer Goal",
        target: (2026, 6, 30),
        target_words: 545,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub profile_created: bool,
    pub milestones_seeded: usize,
}

/// One-time data setup run by the composition root after migrations:
/// creates the singleton learner profile and, on an empty table, the default milestones.
/// Safe to run on every start.
pub async fn bootstrap(db: &Database, seed_milestones: bool) -> Result<BootstrapReport, sqlx::Error> {
    let mut tx = db.pool().begin().await?;

    let profile_created = insert_profile(&mut *tx, &LearnerProfile::default()).await?;
    if profile_created {
        tracing::info!("created learner profile");
    } else {
        tracing::debug!("learner profile already exists");
    }

    let mut milestones_seeded = 0;
    if seed_milestones && count_milestones(&mut *tx).await? == 0 {
        for milestone in DEFAULT_MILESTONES {
            let (y, m, d) = milestone.target;
            let Some(target_date) = NaiveDate::from_ymd_opt(y, m, d) else {
                continue;
            };
            insert_milestone(
                &mut *tx,
                &MilestoneInput {
                    name: milestone.name.to_string(),
                    target_date,
                    target_words: milestone.target_words,
                },
            )
            .await?;
            milestones_seeded += 1;
        }
        tracing::info!(count = milestones_seeded, "seeded default milestones");
    }

    tx.commit().await?;

    Ok(BootstrapReport {
        profile_created,
        milestones_seeded,
    })
}
