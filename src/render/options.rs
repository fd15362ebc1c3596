//! Report options configuration.

use chrono::{Local, NaiveDateTime};

/// Environment variables consulted, in order, for the report author.
const LOGIN_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Author used when neither the environment nor the password database
/// names the user.
const UNKNOWN_AUTHOR: &str = "unknown";

/// Options for the SQL report header.
///
/// Leaving both fields unset takes the author from the environment and the
/// timestamp from the local clock; setting them makes output reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Value of the `Created by` line
    pub author: Option<String>,

    /// Value of the `Created on` line
    pub created_on: Option<NaiveDateTime>,
}

impl ReportOptions {
    /// Create options that read the author and time from the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set a fixed creation time.
    pub fn with_created_on(mut self, created_on: NaiveDateTime) -> Self {
        self.created_on = Some(created_on);
        self
    }

    /// The configured author, or the current login name.
    pub fn resolve_author(&self) -> String {
        self.author.clone().unwrap_or_else(current_user)
    }

    /// The configured creation time, or now in local time.
    pub fn resolve_created_on(&self) -> NaiveDateTime {
        self.created_on
            .unwrap_or_else(|| Local::now().naive_local())
    }
}

/// Login name of the current user.
///
/// The first non-empty login variable wins; otherwise the password database
/// entry for the real user id is used.
pub fn current_user() -> String {
    LOGIN_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .or_else(passwd_user)
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// Name from the password database entry of the real user id.
#[cfg(unix)]
pub fn passwd_user() -> Option<String> {
    use std::ffi::CStr;

    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(
                libc::getuid(),
                &mut entry,
                buf.as_mut_ptr(),
                buf.len(),
                &mut found,
            )
        };

        if rc == libc::ERANGE && buf.len() < 1 << 20 {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || found.is_null() || entry.pw_name.is_null() {
            return None;
        }

        // pw_name points into `buf`, which outlives this borrow
        let name = unsafe { CStr::from_ptr(entry.pw_name) };
        return name
            .to_str()
            .ok()
            .filter(|n| !n.is_empty())
            .map(String::from);
    }
}

#[cfg(not(unix))]
pub fn passwd_user() -> Option<String> {
    None
}
