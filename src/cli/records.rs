//! Activity and reward commands: list, complete, redeem, add, edit, delete

use anyhow::{Context, Result, bail};

use questlog::{Activity, CatalogKind, RecordFields, RecordId, Reward, Tracker};

use super::display::{write_catalog, write_completion, write_redemption};
use super::{Options, save};

pub fn kind_noun(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Activities => "activity",
        CatalogKind::Rewards => "reward",
    }
}

fn resolve(tracker: &Tracker, kind: CatalogKind, name: &str) -> Result<RecordId> {
    match tracker.resolve_selection(kind, name) {
        Some(id) => Ok(id),
        None => bail!("Unknown {}: \"{}\"", kind_noun(kind), name),
    }
}

/// List activities or rewards, grouped and sorted
pub fn list_command(opts: &Options, kind: CatalogKind, json: bool) -> Result<()> {
    let tracker = opts.open_tracker()?;
    let catalog = tracker.list_catalog(kind);

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    write_catalog(&mut std::io::stdout().lock(), &catalog)
}

pub fn complete_command(opts: &Options, name: &str) -> Result<()> {
    let mut tracker = opts.open_tracker()?;
    let id = resolve(&tracker, CatalogKind::Activities, name)?;
    let completion = tracker.complete_activity(id)?;
    save(&mut tracker)?;
    write_completion(&mut std::io::stdout().lock(), &completion)
}

pub fn redeem_command(opts: &Options, name: &str) -> Result<()> {
    let mut tracker = opts.open_tracker()?;
    let id = resolve(&tracker, CatalogKind::Rewards, name)?;
    let redemption = tracker.redeem_reward(id)?;
    save(&mut tracker)?;
    write_redemption(&mut std::io::stdout().lock(), &redemption)
}

pub fn add_activity_command(opts: &Options, name: &str, points: &str, daily: &str) -> Result<()> {
    let activity = Activity::parse(name, points, daily)?;
    let mut tracker = opts.open_tracker()?;
    let name = activity.name.clone();
    tracker.add_record(RecordFields::Activity(activity))?;
    println!("Activity \"{name}\" added successfully!");
    Ok(())
}

pub fn add_reward_command(opts: &Options, name: &str, price: &str, regular: &str) -> Result<()> {
    let reward = Reward::parse(name, price, regular)?;
    let mut tracker = opts.open_tracker()?;
    let name = reward.name.clone();
    tracker.add_record(RecordFields::Reward(reward))?;
    println!("Reward \"{name}\" added successfully!");
    Ok(())
}

/// Replacement values for an edit; `None` keeps the current value
#[derive(Debug, Default)]
pub struct EditArgs {
    pub name: Option<String>,
    pub value: Option<String>,
    pub flag: Option<String>,
}

/// Build replacement fields for record `id`, keeping whatever is not edited
pub fn edit_fields(
    tracker: &Tracker,
    kind: CatalogKind,
    id: RecordId,
    edits: &EditArgs,
) -> Result<RecordFields> {
    let fields = match kind {
        CatalogKind::Activities => {
            let current = tracker
                .store()
                .activities()
                .get(id)
                .context("Activity disappeared")?;
            let points = current.points.to_string();
            let daily = current.daily.to_string();
            RecordFields::Activity(Activity::parse(
                edits.name.as_deref().unwrap_or(&current.name),
                edits.value.as_deref().unwrap_or(&points),
                edits.flag.as_deref().unwrap_or(&daily),
            )?)
        }
        CatalogKind::Rewards => {
            let current = tracker
                .store()
                .rewards()
                .get(id)
                .context("Reward disappeared")?;
            let price = current.price.to_string();
            let regular = current.regular.to_string();
            RecordFields::Reward(Reward::parse(
                edits.name.as_deref().unwrap_or(&current.name),
                edits.value.as_deref().unwrap_or(&price),
                edits.flag.as_deref().unwrap_or(&regular),
            )?)
        }
    };
    Ok(fields)
}

pub fn edit_command(opts: &Options, kind: CatalogKind, name: &str, edits: &EditArgs) -> Result<()> {
    let mut tracker = opts.open_tracker()?;
    let id = resolve(&tracker, kind, name)?;
    let fields = edit_fields(&tracker, kind, id, edits)?;
    tracker.edit_record(id, fields)?;
    println!("Updated {} \"{name}\".", kind_noun(kind));
    Ok(())
}

pub fn delete_command(opts: &Options, kind: CatalogKind, name: &str) -> Result<()> {
    let mut tracker = opts.open_tracker()?;
    let id = resolve(&tracker, kind, name)?;
    tracker.delete_record(kind, id)?;
    println!("Deleted {} \"{name}\".", kind_noun(kind));
    Ok(())
}
