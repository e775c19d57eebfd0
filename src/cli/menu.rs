//! Interactive numbered console menu

use std::io::{BufRead, Write};

use anyhow::Result;

use questlog::{Activity, CatalogKind, RecordFields, RecordId, Reward, Tracker, TrackerError};
use questlog::models::parse_flag;

use super::display::{
    write_achievements, write_catalog, write_completion, write_redemption, write_status,
    write_users,
};
use super::Options;
use super::records::{EditArgs, edit_fields, kind_noun};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    ShowActivities,
    ShowRewards,
    ShowStatus,
    CompleteActivity,
    RedeemReward,
    AddActivity,
    AddReward,
    ShowAchievements,
    EditActivity,
    DeleteActivity,
    EditReward,
    DeleteReward,
    SwitchUser,
    AddUser,
    DeleteUser,
    Save,
    Reload,
}

const ACTIONS: &[(Action, &str)] = &[
    (Action::Quit, "Quit"),
    (Action::ShowActivities, "Show Activities"),
    (Action::ShowRewards, "Show Rewards"),
    (Action::ShowStatus, "Show Status"),
    (Action::CompleteActivity, "Complete Activity"),
    (Action::RedeemReward, "Redeem Reward"),
    (Action::AddActivity, "Add Activity"),
    (Action::AddReward, "Add Reward"),
    (Action::ShowAchievements, "Show Achievements"),
    (Action::EditActivity, "Edit Activity"),
    (Action::DeleteActivity, "Delete Activity"),
    (Action::EditReward, "Edit Reward"),
    (Action::DeleteReward, "Delete Reward"),
    (Action::SwitchUser, "Switch User"),
    (Action::AddUser, "Add User"),
    (Action::DeleteUser, "Delete User"),
    (Action::Save, "Save Progress"),
    (Action::Reload, "Reload Data"),
];

/// Open the tracker and run the menu on stdin/stdout
pub fn menu_command(opts: &Options) -> Result<()> {
    let mut tracker = opts.open_tracker()?;
    println!("Welcome, {}!", tracker.active_user().name);

    let stdin = std::io::stdin();
    run_menu(&mut tracker, &mut stdin.lock(), &mut std::io::stdout().lock())
}

/// Run the menu until Quit or end of input, then save the active user
pub fn run_menu(tracker: &mut Tracker, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut menu = Menu { tracker, input, out };
    menu.run()
}

struct Menu<'a, R, W> {
    tracker: &'a mut Tracker,
    input: &'a mut R,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            self.write_actions()?;
            let Some(choice) =
                self.prompt("What would you like to do? Enter the number of an operation: ")?
            else {
                break;
            };

            let action = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| ACTIONS.get(n))
                .map(|(action, _)| *action);

            match action {
                None => writeln!(self.out, "{choice} is invalid operation number!")?,
                Some(Action::Quit) => break,
                Some(action) => {
                    if let Err(e) = self.perform(action) {
                        self.report(e)?;
                    }
                }
            }
        }

        self.tracker.save_active_user()?;
        writeln!(self.out, "Progress saved. Bye!")?;
        Ok(())
    }

    fn write_actions(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Available Actions:")?;
        for (i, (_, label)) in ACTIONS.iter().enumerate() {
            writeln!(self.out, "{i}. {label}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Print a recoverable error and carry on; hand fatal ones back
    fn report(&mut self, error: anyhow::Error) -> Result<()> {
        match error.downcast_ref::<TrackerError>() {
            Some(e) if e.is_fatal() => return Err(error),
            Some(e) => {
                writeln!(self.out, "Error: {e}")?;
                if let Some(shortfall) = e.shortfall() {
                    writeln!(self.out, "Need {shortfall} more points!")?;
                }
            }
            None => writeln!(self.out, "Error: {error:#}")?,
        }
        Ok(())
    }

    /// Read one trimmed line, `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `prompt`, but an empty answer means "keep"
    fn prompt_optional(&mut self, text: &str) -> Result<Option<String>> {
        Ok(self.prompt(text)?.filter(|answer| !answer.is_empty()))
    }

    fn confirm(&mut self, text: &str) -> Result<bool> {
        match self.prompt(text)? {
            Some(answer) => Ok(parse_flag("confirmation", &answer)?),
            None => Ok(false),
        }
    }

    fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => Ok(()),
            Action::ShowActivities => {
                let catalog = self.tracker.list_catalog(CatalogKind::Activities);
                write_catalog(self.out, &catalog)
            }
            Action::ShowRewards => {
                let catalog = self.tracker.list_catalog(CatalogKind::Rewards);
                write_catalog(self.out, &catalog)
            }
            Action::ShowStatus => write_status(self.out, self.tracker),
            Action::ShowAchievements => write_achievements(self.out, self.tracker),
            Action::CompleteActivity => self.complete_activity(),
            Action::RedeemReward => self.redeem_reward(),
            Action::AddActivity => self.add_activity(),
            Action::AddReward => self.add_reward(),
            Action::EditActivity => self.edit_record(CatalogKind::Activities),
            Action::EditReward => self.edit_record(CatalogKind::Rewards),
            Action::DeleteActivity => self.delete_record(CatalogKind::Activities),
            Action::DeleteReward => self.delete_record(CatalogKind::Rewards),
            Action::SwitchUser => self.switch_user(),
            Action::AddUser => self.add_user(),
            Action::DeleteUser => self.delete_user(),
            Action::Save => {
                self.tracker.save_active_user()?;
                writeln!(self.out, "Progress saved!")?;
                Ok(())
            }
            Action::Reload => {
                self.tracker.reload()?;
                writeln!(self.out, "Data reloaded successfully!")?;
                Ok(())
            }
        }
    }

    /// Show a catalog and let the user pick an entry by number
    fn pick(&mut self, kind: CatalogKind) -> Result<Option<(RecordId, String)>> {
        let catalog = self.tracker.list_catalog(kind);
        write_catalog(self.out, &catalog)?;
        if catalog.is_empty() {
            return Ok(None);
        }

        let noun = kind_noun(kind);
        let Some(answer) = self.prompt(&format!("Enter the {noun} number: "))? else {
            return Ok(None);
        };
        let entry = answer.parse::<usize>().ok().and_then(|n| catalog.nth(n));
        match entry {
            Some(entry) => Ok(Some((entry.record_id(), entry.name.clone()))),
            None => {
                writeln!(self.out, "{answer} is invalid {noun} number!")?;
                Ok(None)
            }
        }
    }

    fn pick_user(&mut self) -> Result<Option<String>> {
        write_users(self.out, self.tracker)?;
        let Some(answer) = self.prompt("Enter the user number: ")? else {
            return Ok(None);
        };
        let name = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.tracker.users().records().nth(i))
            .map(|u| u.name.clone());
        if name.is_none() {
            writeln!(self.out, "{answer} is invalid user number!")?;
        }
        Ok(name)
    }

    fn complete_activity(&mut self) -> Result<()> {
        if let Some((id, _)) = self.pick(CatalogKind::Activities)? {
            let completion = self.tracker.complete_activity(id)?;
            write_completion(self.out, &completion)?;
        }
        Ok(())
    }

    fn redeem_reward(&mut self) -> Result<()> {
        if let Some((id, _)) = self.pick(CatalogKind::Rewards)? {
            let redemption = self.tracker.redeem_reward(id)?;
            write_redemption(self.out, &redemption)?;
        }
        Ok(())
    }

    fn add_activity(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the activity name: ")? else {
            return Ok(());
        };
        let Some(points) = self.prompt("Enter the activity points: ")? else {
            return Ok(());
        };
        let Some(daily) = self.prompt("Is this a daily task? (yes/no): ")? else {
            return Ok(());
        };

        let activity = Activity::parse(&name, &points, &daily)?;
        let name = activity.name.clone();
        self.tracker.add_record(RecordFields::Activity(activity))?;
        writeln!(self.out, "Activity \"{name}\" added successfully!")?;
        Ok(())
    }

    fn add_reward(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the reward name: ")? else {
            return Ok(());
        };
        let Some(price) = self.prompt("Enter the reward price: ")? else {
            return Ok(());
        };
        let Some(regular) = self.prompt("Is this a regular reward? (yes/no): ")? else {
            return Ok(());
        };

        let reward = Reward::parse(&name, &price, &regular)?;
        let name = reward.name.clone();
        self.tracker.add_record(RecordFields::Reward(reward))?;
        writeln!(self.out, "Reward \"{name}\" added successfully!")?;
        Ok(())
    }

    fn edit_record(&mut self, kind: CatalogKind) -> Result<()> {
        let Some((id, name)) = self.pick(kind)? else {
            return Ok(());
        };
        let (value_label, flag_label) = match kind {
            CatalogKind::Activities => ("points", "daily task (yes/no)"),
            CatalogKind::Rewards => ("price", "regular reward (yes/no)"),
        };

        writeln!(self.out, "Editing \"{name}\". Press Enter to keep a value.")?;
        let edits = EditArgs {
            name: self.prompt_optional("New name: ")?,
            value: self.prompt_optional(&format!("New {value_label}: "))?,
            flag: self.prompt_optional(&format!("New {flag_label}: "))?,
        };

        let fields = edit_fields(self.tracker, kind, id, &edits)?;
        self.tracker.edit_record(id, fields)?;
        writeln!(self.out, "{} updated!", capitalize(kind_noun(kind)))?;
        Ok(())
    }

    fn delete_record(&mut self, kind: CatalogKind) -> Result<()> {
        let Some((id, name)) = self.pick(kind)? else {
            return Ok(());
        };
        if !self.confirm(&format!("Delete \"{name}\"? (yes/no): "))? {
            return Ok(());
        }
        self.tracker.delete_record(kind, id)?;
        writeln!(self.out, "{} \"{name}\" deleted!", capitalize(kind_noun(kind)))?;
        Ok(())
    }

    fn switch_user(&mut self) -> Result<()> {
        if let Some(name) = self.pick_user()? {
            self.tracker.switch_user(&name)?;
            writeln!(self.out, "Switched to \"{name}\".")?;
        }
        Ok(())
    }

    fn add_user(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter user name: ")? else {
            return Ok(());
        };
        self.tracker.add_user(&name)?;
        writeln!(self.out, "User \"{name}\" added!")?;
        Ok(())
    }

    fn delete_user(&mut self) -> Result<()> {
        let Some(name) = self.pick_user()? else {
            return Ok(());
        };
        if !self.confirm(&format!("Delete user \"{name}\"? This cannot be undone! (yes/no): "))? {
            return Ok(());
        }
        self.tracker.delete_user(&name)?;
        writeln!(self.out, "User \"{name}\" deleted!")?;
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questlog::store::write_defaults;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Tracker) {
        let dir = tempdir().unwrap();
        write_defaults(dir.path(), false).unwrap();
        let mut tracker = Tracker::open(dir.path(), None).unwrap();
        tracker
            .add_record(RecordFields::Activity(Activity::new("Gym", 25, true)))
            .unwrap();
        tracker
            .add_record(RecordFields::Reward(Reward::new("Movie", 50, true)))
            .unwrap();
        (dir, tracker)
    }

    fn run(tracker: &mut Tracker, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_menu(tracker, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_complete_then_quit_saves() {
        let (dir, mut tracker) = setup();
        let output = run(&mut tracker, "4\n1\n0\n");

        assert!(output.contains("Activity \"Gym\" completed! You earned 25 points."));
        assert!(output.contains("Progress saved. Bye!"));

        let reopened = Tracker::open(dir.path(), None).unwrap();
        assert_eq!(reopened.active_user().total_points, 25);
        assert_eq!(reopened.active_user().activities_completed, 1);
    }

    #[test]
    fn test_invalid_operation_redisplays_menu() {
        let (_dir, mut tracker) = setup();
        let output = run(&mut tracker, "42\nabc\n0\n");

        assert!(output.contains("42 is invalid operation number!"));
        assert!(output.contains("abc is invalid operation number!"));
        assert_eq!(output.matches("Available Actions:").count(), 3);
    }

    #[test]
    fn test_redeem_without_points_reports_shortfall() {
        let (_dir, mut tracker) = setup();
        let output = run(&mut tracker, "5\n1\n0\n");

        assert!(output.contains("Error: Not enough points"));
        assert!(output.contains("Need 50 more points!"));
        assert_eq!(tracker.active_user().total_points, 0);
    }

    #[test]
    fn test_add_activity_with_bad_points() {
        let (_dir, mut tracker) = setup();
        let output = run(&mut tracker, "6\nRun\nten\nyes\n0\n");

        assert!(output.contains("Error: Invalid activity_points"));
        assert!(tracker.resolve_selection(CatalogKind::Activities, "Run").is_none());
    }

    #[test]
    fn test_end_of_input_still_saves() {
        let (dir, mut tracker) = setup();
        run(&mut tracker, "4\n1\n");

        let reopened = Tracker::open(dir.path(), None).unwrap();
        assert_eq!(reopened.active_user().alltime_points, 25);
    }

    #[test]
    fn test_delete_last_user_refused() {
        let (_dir, mut tracker) = setup();
        let output = run(&mut tracker, "15\n1\nyes\n0\n");

        assert!(output.contains("last user"));
        assert_eq!(tracker.users().len(), 1);
    }
}
