//! User management commands

use anyhow::Result;

use super::Options;
use super::display::write_users;

pub fn users_command(opts: &Options) -> Result<()> {
    let tracker = opts.open_tracker()?;
    write_users(&mut std::io::stdout().lock(), &tracker)
}

pub fn add_user_command(opts: &Options, name: &str) -> Result<()> {
    let mut tracker = opts.open_tracker()?;
    tracker.add_user(name)?;
    println!("User \"{}\" added!", name.trim());
    Ok(())
}

pub fn delete_user_command(opts: &Options, name: &str) -> Result<()> {
    let mut tracker = opts.open_tracker()?;
    tracker.delete_user(name)?;
    println!("User \"{name}\" deleted!");
    Ok(())
}
