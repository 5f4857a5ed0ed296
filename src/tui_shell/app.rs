use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::model::{Filter, TaskId, UserId};
use crate::remote::{RemoteClient, TodoStore};
use crate::sync::{BatchReport, EngineSettings, Outcome, SyncEngine, TaskRow, ViewModel};

use super::input::Input;

mod actions;
mod event_loop;
mod keys;
mod render;
mod runtime;
mod state;
mod time_utils;

pub(super) use self::runtime::run;

use self::actions::{Pending, Settled};
use self::state::{App, EntryKind, Focus};
use self::time_utils::{fmt_ts_ui, now_ts};
