use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use eventify::catalog::{ALL, Collection, CollegeFilter, EventFilter, StaticCollection, college_facets, sample};
use eventify::config::{ClientConfig, MIN_QUERY_LEN};
use eventify::error::ApiError;
use eventify::forms::{CardDetails, RegistrationForm, SignInForm, SignUpForm};
use eventify::net::api::{ApiClient, AuthApi};
use eventify::net::types::{Challenge, College, Event};
use eventify::routes::Route;
use eventify::state::auth::{AuthError, AuthSession};
use eventify::state::registration::checkout::{
    BackendProcessor, Checkout, PaymentError, PaymentProcessor, SimulatedProcessor, format_rupees, spawn_payment,
};
use eventify::state::registration::confirmation::{Celebration, Confirmation};
use eventify::state::registration::{
    FlowError, RegisterOutcome, RegistrationFlow, RegistrationSubject, SubjectRef, find_subject,
};
use eventify::state::search::{ResultKind, SearchCoordinator, SearchResult};
use eventify::storage::FileStorage;
use eventify::toast::{Toast, Toaster};
use eventify::util::auth::{Guard, guard_route};
use serde_json::Value;
use tracing_subscriber::EnvFilter;


/// Extra time allowed after the debounce for both catalog fetches.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no event or challenge matches {0}")]
    UnknownSubject(SubjectRef),
    #[error("sign in first: run `eventify-cli login`")]
    SignInRequired,
    #[error("timed out waiting for search results")]
    Timeout,
    #[error("payment interrupted")]
    Interrupted,
}

impl CliError {
    /// Auth and payment failures were already shown as toasts.
    fn already_reported(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Payment(_))
    }
}

#[derive(Parser, Debug)]
#[command(name = "eventify-cli", about = "Browse, search and register for student events")]
struct Cli {
    /// REST base URL, e.g. `http://localhost:5000/api`.
    #[arg(long, env = "EVENTIFY_API_URL")]
    api_url: Option<String>,

    /// Directory for the local and session storage files.
    #[arg(long, env = "EVENTIFY_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Browse and search the bundled sample catalog instead of the backend.
    #[arg(long, default_value_t = false)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search events and colleges.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List events.
    Events(EventsArgs),
    /// List colleges.
    Colleges(CollegesArgs),
    Login(LoginArgs),
    Signup(SignupArgs),
    Logout,
    Whoami,
    /// Fill in the registration form for an event (`3`, `event:3`) or a
    /// challenge (`challenge:2`).
    Register(RegisterArgs),
    /// Pay for a registration and show the confirmation.
    Pay(PayArgs),
}

#[derive(Args, Debug)]
struct EventsArgs {
    #[arg(long, default_value = "")]
    term: String,
    #[arg(long, default_value = ALL)]
    category: String,
    #[arg(long, default_value = ALL)]
    location: String,
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct CollegesArgs {
    #[arg(long, default_value = "")]
    term: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long = "type", default_value = "")]
    college_type: String,
    /// Print the available states and types instead of colleges.
    #[arg(long, default_value_t = false)]
    facets: bool,
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "EVENTIFY_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "EVENTIFY_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    subject: SubjectRef,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value_t = 1)]
    team_size: u8,
}

#[derive(Args, Debug)]
struct PayArgs {
    subject: SubjectRef,
    #[arg(long)]
    card_number: String,
    #[arg(long)]
    card_holder: String,
    #[arg(long)]
    expiry: String,
    #[arg(long)]
    cvv: String,
    /// Record the registration with the backend instead of simulating.
    #[arg(long, default_value_t = false)]
    record: bool,
    #[arg(long, default_value_t = false)]
    no_confetti: bool,
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Prints toasts to stderr.
struct ConsoleToaster;

impl Toaster for ConsoleToaster {
    fn toast(&self, toast: Toast) {
        if toast.is_destructive() {
            eprintln!("error: {}: {}", toast.title, toast.description);
        } else {
            eprintln!("{}: {}", toast.title, toast.description);
        }
    }
}

struct CliContext {
    config: ClientConfig,
    offline: bool,
    local: Arc<FileStorage>,
    session: Arc<FileStorage>,
    api: Arc<ApiClient>,
    toaster: Arc<ConsoleToaster>,
}

impl CliContext {
    fn new(cli: &Cli) -> Self {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &cli.api_url {
            config.api_base_url = url.trim_end_matches('/').to_owned();
        }
        if let Some(dir) = &cli.state_dir {
            config.state_dir.clone_from(dir);
        }

        let local = Arc::new(FileStorage::open(config.state_dir.join("local.json")));
        let session = Arc::new(FileStorage::open(config.state_dir.join("session.json")));
        let api = Arc::new(ApiClient::from_config(&config, local.clone()));
        Self { config, offline: cli.offline, local, session, api, toaster: Arc::new(ConsoleToaster) }
    }

    fn events(&self) -> Arc<dyn Collection<Event>> {
        if self.offline { Arc::new(StaticCollection::new(sample::events())) } else { self.api.clone() }
    }

    fn colleges(&self) -> Arc<dyn Collection<College>> {
        if self.offline { Arc::new(StaticCollection::new(sample::colleges())) } else { self.api.clone() }
    }

    /// Auth session hydrated from local storage.
    fn auth(&self) -> Arc<AuthSession> {
        let auth = Arc::new(AuthSession::new(self.api.clone(), self.local.clone(), self.toaster.clone()));
        auth.hydrate();
        auth
    }

    /// Everything a registration can target. Offline this is the sample
    /// catalog; an unreachable backend falls back to the featured events.
    async fn subjects(&self) -> Vec<RegistrationSubject> {
        if self.offline {
            return sample::events().iter().map(RegistrationSubject::from).collect();
        }
        let events = <ApiClient as Collection<Event>>::get_all(&self.api);
        let challenges = <ApiClient as Collection<Challenge>>::get_all(&self.api);
        match tokio::join!(events, challenges) {
            (Ok(events), Ok(challenges)) => events
                .iter()
                .map(RegistrationSubject::from)
                .chain(challenges.iter().map(RegistrationSubject::from))
                .collect(),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "catalog unavailable; using featured events");
                sample::featured_events().iter().map(RegistrationSubject::from).collect()
            }
        }
    }
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let ctx = CliContext::new(&cli);

    match run(&ctx, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.already_reported() {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Search { query } => run_search(ctx, &query.join(" ")).await,
        Command::Events(args) => run_events(ctx, args).await,
        Command::Colleges(args) => run_colleges(ctx, args).await,
        Command::Login(args) => run_login(ctx, args).await,
        Command::Signup(args) => run_signup(ctx, args).await,
        Command::Logout => {
            ctx.auth().sign_out().await;
            Ok(())
        }
        Command::Whoami => run_whoami(ctx).await,
        Command::Register(args) => run_register(ctx, args).await,
        Command::Pay(args) => run_pay(ctx, args).await,
    }
}

// =============================================================================
// BROWSING
// =============================================================================

async fn run_search(ctx: &CliContext, query: &str) -> Result<(), CliError> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        println!("Type at least {MIN_QUERY_LEN} characters to search");
        return Ok(());
    }

    let coordinator = SearchCoordinator::new(ctx.events(), ctx.colleges(), ctx.config.search());
    let mut rx = coordinator.subscribe();
    coordinator.set_query(query);

    let wait = ctx.config.search_debounce + SEARCH_TIMEOUT;
    let state = match tokio::time::timeout(wait, rx.wait_for(|s| s.open)).await {
        Ok(Ok(state)) => (*state).clone(),
        _ => return Err(CliError::Timeout),
    };

    if state.results.is_empty() {
        println!("No results found for \"{}\"", state.query);
    }
    for result in &state.results {
        println!("{}", search_line(result));
    }
    Ok(())
}

fn search_line(result: &SearchResult) -> String {
    let kind = match result.kind {
        ResultKind::Event => "event",
        ResultKind::College => "college",
    };
    let mut line = format!("{kind:<8} {}  {}", result.title, result.route());
    for extra in [&result.location, &result.date].into_iter().flatten() {
        line.push_str(" | ");
        line.push_str(extra);
    }
    line
}

async fn run_events(ctx: &CliContext, args: EventsArgs) -> Result<(), CliError> {
    let events = ctx.events().get_all().await?;
    let filter = EventFilter { term: args.term, category: args.category, location: args.location };
    let matched = filter.apply(&events);

    if args.json {
        return print_json(&serde_json::to_value(&matched)?);
    }
    if matched.is_empty() {
        println!("No events found");
    }
    for event in matched {
        println!("{}", event_line(event));
    }
    Ok(())
}

fn event_line(event: &Event) -> String {
    format!(
        "{:>4}  {}  [{}] {} | {} | {}",
        event.id,
        event.title,
        event.category,
        event.date,
        event.location,
        format_rupees(event.price)
    )
}

async fn run_colleges(ctx: &CliContext, args: CollegesArgs) -> Result<(), CliError> {
    let colleges = ctx.colleges().get_all().await?;

    if args.facets {
        let facets = college_facets(&colleges);
        println!("States: {}", facets.states.join(", "));
        println!("Types:  {}", facets.types.join(", "));
        return Ok(());
    }

    let filter = CollegeFilter { term: args.term, state: args.state, college_type: args.college_type };
    let matched = filter.apply(&colleges);
    if args.json {
        return print_json(&serde_json::to_value(&matched)?);
    }
    if matched.is_empty() {
        println!("No colleges found");
    }
    for college in matched {
        println!("{}", college_line(college));
    }
    Ok(())
}

fn college_line(college: &College) -> String {
    let kind = college.college_type.as_deref().unwrap_or("College");
    format!("{:>4}  {} ({})  {} | {}, {}", college.id, college.name, college.short_name, kind, college.location, college.state)
}

// =============================================================================
// AUTH
// =============================================================================

async fn run_login(ctx: &CliContext, args: LoginArgs) -> Result<(), CliError> {
    let auth = ctx.auth();
    let form = SignInForm { email: args.email, password: args.password };
    auth.sign_in_with_form(&form).await?;
    resume_registration(ctx, auth).await
}

async fn run_signup(ctx: &CliContext, args: SignupArgs) -> Result<(), CliError> {
    let auth = ctx.auth();
    let form = SignUpForm {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    auth.sign_up_with_form(&form).await?;
    resume_registration(ctx, auth).await
}

/// Pick up a registration stashed while signed out.
async fn resume_registration(ctx: &CliContext, auth: Arc<AuthSession>) -> Result<(), CliError> {
    let mut flow = RegistrationFlow::new(auth, ctx.session.clone());
    if flow.pending().is_none() {
        return Ok(());
    }
    let Some(pending) = flow.resume_pending(ctx.subjects().await)? else {
        return Ok(());
    };
    let title = flow.phase().subject().map_or_else(|| pending.to_string(), |s| s.title.clone());
    println!("Resuming registration for {title}. Complete it with:");
    println!("  eventify-cli register {pending} --name <name> --email <email> --phone <phone>");
    Ok(())
}

async fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    let auth = ctx.auth();
    if let Guard::Redirect(route) = guard_route(Route::Profile, &auth.snapshot()) {
        println!("Not signed in (sign in at {route})");
        return Ok(());
    }
    let Some(user) = auth.user() else {
        return Ok(());
    };
    if ctx.offline {
        return print_json(&serde_json::to_value(&user)?);
    }
    let current = ctx.api.current_user().await?;
    print_json(&serde_json::to_value(&current)?)
}

// =============================================================================
// REGISTRATION
// =============================================================================

async fn run_register(ctx: &CliContext, args: RegisterArgs) -> Result<(), CliError> {
    let subject = find_subject(&ctx.subjects().await, args.subject).ok_or(CliError::UnknownSubject(args.subject))?;
    let mut flow = RegistrationFlow::new(ctx.auth(), ctx.session.clone());
    flow.open_details(subject.clone())?;

    if let RegisterOutcome::Redirect(route) = flow.register_now()? {
        println!("Please sign in to register ({route}). Your registration resumes after `eventify-cli login`.");
        return Ok(());
    }

    if let Some(form) = flow.form_mut() {
        *form = RegistrationForm {
            name: args.name,
            email: args.email,
            phone_number: args.phone,
            team_size: args.team_size,
        };
    }
    let route = flow.submit()?;

    println!("Registered details for {}", subject.title);
    if let Ok(checkout) = Checkout::resolve(subject.subject_ref(), std::slice::from_ref(&subject)) {
        for (label, amount) in checkout.summary().lines() {
            println!("  {label:<18} {amount}");
        }
    }
    println!("{} -> {route}", subject.proceed_label());
    println!(
        "  eventify-cli pay {} --card-number <number> --card-holder <name> --expiry <MM/YY> --cvv <cvv>",
        subject.subject_ref()
    );
    Ok(())
}

async fn run_pay(ctx: &CliContext, args: PayArgs) -> Result<(), CliError> {
    let subjects = ctx.subjects().await;
    let checkout = Checkout::resolve(args.subject, &subjects).map_err(|_| CliError::UnknownSubject(args.subject))?;

    println!("Order summary for {}", checkout.subject().title);
    for (label, amount) in checkout.summary().lines() {
        println!("  {label:<18} {amount}");
    }

    let processor: Arc<dyn PaymentProcessor> = if args.record {
        if !ctx.auth().is_authenticated() {
            return Err(CliError::SignInRequired);
        }
        Arc::new(BackendProcessor::new(ctx.api.clone()))
    } else {
        Arc::new(SimulatedProcessor { delay: ctx.config.payment_delay })
    };

    let card = CardDetails {
        card_number: args.card_number,
        card_holder: args.card_holder,
        expiry_date: args.expiry,
        cvv: args.cvv,
    };
    let payment = spawn_payment(checkout, card, processor, ctx.toaster.clone());
    let outcome = tokio::select! {
        outcome = payment.join() => outcome,
        _ = tokio::signal::ctrl_c() => None,
    };
    let route = outcome.ok_or(CliError::Interrupted)??;
    tracing::debug!(%route, "payment finished");

    let confirmation =
        Confirmation::resolve(args.subject, &subjects).map_err(|_| CliError::UnknownSubject(args.subject))?;
    print_confirmation(&confirmation);

    if !args.no_confetti {
        Celebration::default()
            .play(|particles| eprintln!("{}", "*".repeat(particles as usize)))
            .await;
    }
    Ok(())
}

fn print_confirmation(confirmation: &Confirmation) {
    let subject = confirmation.subject();
    println!("Registration Successful!");
    println!("  Registration ID  {}", confirmation.registration_id());
    println!("  {}", subject.title);
    println!("  Organizer        {}", subject.organizer);
    println!("  Date             {}", subject.date);
    println!("  Location         {}", subject.location);
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
