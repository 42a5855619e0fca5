//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use note_hub_core::identity::{AdminListCheck, IdentityCheck, PresenceCheck};
use note_hub_core::store::{IdAllocation, NoteStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IdentityMode {
    /// Any non-empty identity header is accepted
    Presence,
    /// The identity must be listed in the admins file
    AdminList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum IdMode {
    /// count + 1
    Count,
    /// max(id) + 1
    Max,
}

impl From<IdMode> for IdAllocation {
    fn from(mode: IdMode) -> Self {
        match mode {
            IdMode::Count => IdAllocation::CountPlusOne,
            IdMode::Max => IdAllocation::MaxPlusOne,
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(name = "note-hub")]
#[command(about = "Personal notes over HTTP, stored in a flat JSON file")]
pub struct Config {
    /// Listen address
    #[arg(long, env = "NOTE_HUB_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// Notes document
    #[arg(long, env = "NOTE_HUB_NOTES_FILE", default_value = "data/notes.json")]
    pub notes_file: PathBuf,

    /// Admins document, used by the admin-list identity mode
    #[arg(long, env = "NOTE_HUB_ADMINS_FILE", default_value = "data/admin.json")]
    pub admins_file: PathBuf,

    #[arg(long, env = "NOTE_HUB_IDENTITY_MODE", value_enum, default_value_t = IdentityMode::Presence)]
    pub identity_mode: IdentityMode,

    /// Header carrying the caller's identity
    #[arg(long, env = "NOTE_HUB_IDENTITY_HEADER", default_value = "authorization")]
    pub identity_header: String,

    #[arg(long, env = "NOTE_HUB_ID_ALLOCATION", value_enum, default_value_t = IdMode::Count)]
    pub id_allocation: IdMode,

    /// Create an empty notes document if it does not exist
    #[arg(long)]
    pub init_store: bool,
}

impl Config {
    pub fn store(&self) -> NoteStore {
        NoteStore::new(&self.notes_file).with_id_allocation(self.id_allocation.into())
    }

    pub fn identity_check(&self) -> Arc<dyn IdentityCheck> {
        match self.identity_mode {
            IdentityMode::Presence => Arc::new(PresenceCheck),
            IdentityMode::AdminList => Arc::new(AdminListCheck::new(&self.admins_file)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["note-hub"]).unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(cfg.notes_file, PathBuf::from("data/notes.json"));
        assert_eq!(cfg.identity_mode, IdentityMode::Presence);
        assert_eq!(cfg.id_allocation, IdMode::Count);
        assert_eq!(cfg.identity_header, "authorization");
        assert!(!cfg.init_store);
    }

    #[test]
    fn flags_select_variants() {
        let cfg = Config::try_parse_from([
            "note-hub",
            "--identity-mode",
            "admin-list",
            "--id-allocation",
            "max",
            "--notes-file",
            "/tmp/n.json",
        ])
        .unwrap();
        assert_eq!(cfg.identity_mode, IdentityMode::AdminList);
        assert_eq!(IdAllocation::from(cfg.id_allocation), IdAllocation::MaxPlusOne);
        assert_eq!(cfg.store().path(), std::path::Path::new("/tmp/n.json"));
    }
}
