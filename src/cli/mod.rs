// Command-line shell over the planner core

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::path::PathBuf;

use event_planner::config::AppConfig;
use event_planner::models::event::{Event, EventDraft};
use event_planner::models::profile::ProfileResponse;
use event_planner::models::session::{Registration, Role};
use event_planner::models::time_range::{DayTag, TimeRange};
use event_planner::services::api::{ApiClient, EventsApi, ProfileApi, RecommendationsApi, SavedEventsApi};
use event_planner::services::calendar::CalendarGridBuilder;
use event_planner::services::month_cursor::MonthCursor;
use event_planner::services::profile::ProfileEditor;
use event_planner::services::saved::{load_saved_events, SavedEventsState};
use event_planner::services::session::{Route, RouteDecision, SessionContext, SessionStore};

mod render;

use render::GridStyle;

#[derive(Debug, Parser)]
#[command(name = "event-planner", version, about = "Campus events, saved events and weekly availability")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (does not sign in)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "student")]
        role: String,
    },
    Logout,
    /// Show who is signed in
    Whoami,
    /// List all events
    Events,
    /// Publish a new event (admins)
    CreateEvent {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        /// Local start, "YYYY-MM-DDTHH:MM"
        #[arg(long)]
        start: String,
        /// Local end, "YYYY-MM-DDTHH:MM"
        #[arg(long)]
        end: String,
    },
    /// Month calendar of saved events
    Saved {
        /// Month to show, "YYYY-MM" (defaults to the current month)
        #[arg(long)]
        month: Option<MonthCursor>,
        /// Move the displayed month by this many months
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        shift: i32,
        /// List the month's events in start order instead of a grid
        #[arg(long)]
        agenda: bool,
    },
    /// Save an event
    Save { id: i64 },
    /// Remove an event from the saved list
    Unsave { id: i64 },
    /// Events suggested for your profile
    Recommendations,
    /// View or replace your interests and availability
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    /// Replace interests and/or availability. Omitted parts are kept.
    Set {
        #[arg(long = "interest")]
        interests: Vec<String>,
        /// "Day=HH:MM-HH:MM", e.g. "Mon=09:00-12:00"
        #[arg(long = "slot", value_parser = parse_slot)]
        slots: Vec<TimeRange>,
    },
}

impl Command {
    fn route(&self) -> Option<Route> {
        match self {
            Command::Login { .. } => Some(Route::Login),
            Command::Register { .. } => Some(Route::Register),
            Command::Events => Some(Route::Events),
            Command::CreateEvent { .. } => Some(Route::CreateEvent),
            Command::Saved { .. } | Command::Save { .. } | Command::Unsave { .. } => {
                Some(Route::SavedEvents)
            }
            Command::Recommendations => Some(Route::Recommendations),
            Command::Profile { .. } => Some(Route::Profile),
            Command::Logout | Command::Whoami => None,
        }
    }
}

/// Parse "Day=HH:MM-HH:MM" into a slot
pub fn parse_slot(raw: &str) -> Result<TimeRange, String> {
    let (day, range) = raw
        .split_once('=')
        .ok_or_else(|| format!("Invalid slot '{}', expected Day=HH:MM-HH:MM", raw))?;
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| format!("Invalid slot '{}', expected Day=HH:MM-HH:MM", raw))?;
    let day: DayTag = day.parse()?;
    TimeRange::parse(day, start, end)
}

/// Read a wall-clock date-time in `tz` and convert it to UTC
fn parse_local<Tz: TimeZone>(tz: &Tz, raw: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .with_context(|| format!("Invalid date-time '{}', expected YYYY-MM-DDTHH:MM", raw))?;

    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("'{}' does not exist in the calendar timezone", raw))?;
    Ok(local.with_timezone(&Utc))
}

/// Everything a command needs: configuration, the session and the zone
/// calendar dates are read in.
pub struct App<S: SessionStore, Tz: TimeZone> {
    config: AppConfig,
    session: SessionContext<S>,
    tz: Tz,
}

impl<S, Tz> App<S, Tz>
where
    S: SessionStore,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(config: AppConfig, session: SessionContext<S>, tz: Tz) -> Self {
        Self { config, session, tz }
    }

    fn api(&self) -> Result<ApiClient> {
        let client = ApiClient::new(&self.config.api_base_url, self.config.request_timeout())?;
        Ok(client.with_token(self.session.token().map(str::to_string)))
    }

    fn grid_style(&self) -> GridStyle {
        GridStyle {
            title_max_len: self.config.calendar.title_max_len,
            max_events_per_cell: self.config.calendar.max_events_per_cell,
        }
    }

    fn gate(&self, route: Route) -> Result<()> {
        match self.session.check(route) {
            RouteDecision::Allow => Ok(()),
            RouteDecision::RedirectToLogin => bail!("Please log in first"),
            RouteDecision::RedirectHome => match self.session.user() {
                Some(user) if route.is_public() => {
                    bail!("Already signed in as {}; log out first", user.email)
                }
                Some(user) => bail!("Not available for the {} role", user.role),
                None => bail!("Please log in first"),
            },
        }
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        if let Some(route) = command.route() {
            self.gate(route)?;
        }

        match command {
            Command::Login { email, password } => {
                let api = self.api()?;
                let user = self
                    .session
                    .login(&api, &email, &password)
                    .await
                    .map_err(|err| anyhow!(err.user_message()))?;
                println!("Signed in as {} ({})", user.email, user.role);
            }
            Command::Register {
                name,
                email,
                password,
                role,
            } => {
                let registration = Registration {
                    name,
                    email,
                    password,
                    role: Role::from(role.as_str()),
                };
                self.session
                    .register(&self.api()?, &registration)
                    .await
                    .map_err(|err| anyhow!(err.user_message("Registration failed")))?;
                println!("Registered {}. You can now log in.", registration.email);
            }
            Command::Logout => {
                self.session.logout().context("Failed to clear the stored session")?;
                println!("Signed out");
            }
            Command::Whoami => match self.session.user() {
                Some(user) => println!("{} ({}, id {})", user.email, user.role, user.id),
                None => println!("Not signed in"),
            },
            Command::Events => self.list_events().await?,
            Command::CreateEvent {
                title,
                description,
                location,
                start,
                end,
            } => {
                let draft = EventDraft::builder()
                    .title(title)
                    .description(description)
                    .location(location)
                    .start(parse_local(&self.tz, &start)?)
                    .end(parse_local(&self.tz, &end)?)
                    .build()?;
                let created = self
                    .api()?
                    .create_event(&draft)
                    .await
                    .map_err(|err| anyhow!(err.user_message("Failed to create event")))?;
                println!("Created event #{} {}", created.id, created.title);
            }
            Command::Saved {
                month,
                shift,
                agenda,
            } => {
                let mut cursor = month.unwrap_or_else(MonthCursor::today);
                cursor.shift(shift);
                self.show_saved(cursor, agenda).await?;
            }
            Command::Save { id } => self.save(id).await?,
            Command::Unsave { id } => self.unsave(id).await?,
            Command::Recommendations => {
                let items = self
                    .api()?
                    .recommendations()
                    .await
                    .map_err(|err| anyhow!(err.user_message("Failed to load recommendations")))?;
                print!("{}", render::recommendations(&items));
            }
            Command::Profile { action } => self.profile(action).await?,
        }

        Ok(())
    }

    async fn list_events(&self) -> Result<()> {
        let api = self.api()?;
        let is_student = self.session.user().is_some_and(|user| user.is_student());

        let (events, saved) = if is_student {
            let (events, saved) = tokio::try_join!(api.list_events(), api.list_saved())
                .map_err(|err| anyhow!(err.user_message("Failed to load events")))?;
            (events, saved.into_set())
        } else {
            let events = api
                .list_events()
                .await
                .map_err(|err| anyhow!(err.user_message("Failed to load events")))?;
            (events, Default::default())
        };

        let mut ordered: Vec<&Event> = events.iter().collect();
        ordered.sort_by_key(|event| event.start);
        print!(
            "{}",
            render::event_list(&ordered, |id| saved.contains(&id), &self.tz)
        );
        Ok(())
    }

    async fn show_saved(&self, cursor: MonthCursor, agenda: bool) -> Result<()> {
        let saved = load_saved_events(&self.api()?)
            .await
            .map_err(|err| anyhow!(err.user_message("Failed to load saved events")))?;

        let builder = CalendarGridBuilder::new(self.tz.clone());
        if agenda {
            println!("{}", cursor.label());
            print!("{}", render::agenda(&builder.agenda(cursor, &saved.events), &self.tz));
        } else {
            let today = Utc::now().with_timezone(&self.tz).date_naive();
            let grid = builder.build(cursor, &saved.events);
            print!("{}", render::month_grid(&grid, today, self.grid_style()));
            println!("{} saved events this month", grid.event_count());
        }
        Ok(())
    }

    async fn save(&self, id: i64) -> Result<()> {
        let api = self.api()?;
        let saved = api
            .list_saved()
            .await
            .map_err(|err| anyhow!(err.user_message("Failed to load saved events")))?;
        let mut state = SavedEventsState::new(saved.into_set());

        if state.is_saved(id) {
            println!("Event #{} is already saved", id);
            return Ok(());
        }

        if state.save(&api, id).await {
            println!("Saved event #{}", id);
            Ok(())
        } else {
            bail!("Failed to save event #{}", id)
        }
    }

    async fn unsave(&self, id: i64) -> Result<()> {
        let api = self.api()?;
        let mut saved = load_saved_events(&api)
            .await
            .map_err(|err| anyhow!(err.user_message("Failed to load saved events")))?;

        if !saved.state.is_saved(id) {
            println!("Event #{} is not in your saved list", id);
            return Ok(());
        }

        if saved.unsave(&api, id).await {
            println!("Removed event #{} ({} saved events left)", id, saved.events.len());
            Ok(())
        } else {
            bail!("Failed to remove event #{}", id)
        }
    }

    async fn profile(&self, action: ProfileCommand) -> Result<()> {
        let api = self.api()?;
        let defaults = self.config.slot_defaults()?;

        match action {
            ProfileCommand::Show => {
                let editor = ProfileEditor::load(&api, defaults)
                    .await
                    .map_err(|err| anyhow!(err.user_message("Failed to load profile")))?;
                print!("{}", render::profile(editor.interests(), editor.availability()));
            }
            ProfileCommand::Set { interests, slots } => {
                let current = api
                    .get_profile()
                    .await
                    .map_err(|err| anyhow!(err.user_message("Failed to load profile")))?;

                let merged = ProfileResponse {
                    exists: true,
                    interests: if interests.is_empty() {
                        current.interests
                    } else {
                        interests
                    },
                    availability: if slots.is_empty() {
                        current.availability
                    } else {
                        slots
                    },
                };

                let editor = ProfileEditor::from_response(merged, defaults);
                for slot in editor.availability().to_slots() {
                    if !slot.is_well_formed() {
                        log::warn!("Slot {} ends before it starts", slot);
                    }
                }

                editor
                    .submit(&api)
                    .await
                    .map_err(|err| anyhow!(err.user_message()))?;
                print!("{}", render::profile(editor.interests(), editor.availability()));
            }
        }
        Ok(())
    }
}
