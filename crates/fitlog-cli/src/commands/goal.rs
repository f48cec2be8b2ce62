use chrono::NaiveDate;
use clap::Subcommand;
use fitlog_core::Database;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    Add {
        /// Goal category (e.g. "weight_loss", "workouts_per_week")
        #[arg(long = "type", value_name = "TYPE")]
        goal_type: String,
        /// Target value
        #[arg(long)]
        target: f64,
        /// Starting value
        #[arg(long, default_value = "0")]
        current: f64,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// List goals with progress
    List,
    /// Update a goal's progress or status
    Update {
        id: i64,
        /// New current value
        #[arg(long)]
        current: Option<f64>,
        /// New status: active, completed or abandoned
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a goal
    Delete { id: i64 },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        GoalAction::Add {
            goal_type,
            target,
            current,
            deadline,
        } => {
            let id = db.add_goal(&goal_type, target, current, deadline)?;
            println!("{}", serde_json::json!({ "id": id }));
        }
        GoalAction::List => {
            let goals = db.list_goals()?;
            let rows: Vec<serde_json::Value> = goals
                .iter()
                .map(|g| {
                    let mut v = serde_json::to_value(g).unwrap_or_default();
                    if let Some(obj) = v.as_object_mut() {
                        obj.insert("progress_pct".into(), g.progress_pct().into());
                    }
                    v
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        GoalAction::Update {
            id,
            current,
            status,
        } => {
            if db.update_goal(id, current, status.as_deref())? {
                println!("updated {id}");
            } else {
                eprintln!("no goal with id {id}");
                std::process::exit(1);
            }
        }
        GoalAction::Delete { id } => {
            if db.delete_goal(id)? {
                println!("deleted {id}");
            } else {
                eprintln!("no goal with id {id}");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
