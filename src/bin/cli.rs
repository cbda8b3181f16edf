//! Career Catalog CLI
//!
//! Browse the bundled collections with the same filters the list screens use,
//! manage the local mock session and talk to the chat assistant.

use std::path::PathBuf;
use std::str::FromStr;

use career_catalog::{
    config::{load_catalog, load_config, load_responses},
    error::{AppError, Result},
    filter::{
        CollegeFilter, CourseFilter, EbookFilter, ExamFilter, ListFilter, ListView,
        ScholarshipFilter, Selection, ViewState, facets,
    },
    models::{
        AuthProvider, College, CollegeType, Config, Ebook, ExamCategory, FieldOfStudy,
        ProfileUpdate, Scholarship, SignupDetails, StudentProfile,
    },
    services::{
        CatalogSources, ChatAssistant, LocalSessionProvider, ResourceProvider, Screen,
        SessionProvider, validate_catalog,
    },
    storage::JsonFileStore,
    utils::{
        display_host,
        format::{Overflow, chips, format_inr, truncate},
    },
};
use clap::{Parser, Subcommand, ValueEnum};

/// Career Catalog - colleges, courses, exams, ebooks and scholarships
#[derive(Parser, Debug)]
#[command(
    name = "career-catalog",
    version,
    about = "Student career guidance catalog"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the simulated loading and sign-in delays
    #[arg(long)]
    instant: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List colleges
    Colleges {
        #[arg(short, long, default_value = "")]
        search: String,

        /// government, private or all
        #[arg(long = "type", default_value = "all", value_parser = selection::<CollegeType>)]
        kind: Selection<CollegeType>,

        /// Exact state name or all
        #[arg(long, default_value = "all", value_parser = selection::<String>)]
        state: Selection<String>,
    },

    /// List courses grouped by field of study
    Courses {
        #[arg(short, long, default_value = "")]
        search: String,

        /// Field of study id or all
        #[arg(long, default_value = "all", value_parser = selection::<String>)]
        field: Selection<String>,

        #[arg(long, default_value = "all", value_parser = selection::<String>)]
        duration: Selection<String>,
    },

    /// List exams grouped by category
    Exams {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long, default_value = "all", value_parser = selection::<String>)]
        category: Selection<String>,

        #[arg(long, default_value = "all", value_parser = selection::<String>)]
        sub_category: Selection<String>,
    },

    /// List ebooks, most popular first
    Ebooks {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long, default_value = "all", value_parser = selection::<String>)]
        subject: Selection<String>,

        #[arg(long, default_value = "all", value_parser = selection::<i32>)]
        year: Selection<i32>,
    },

    /// List scholarships
    Scholarships {
        #[arg(short, long, default_value = "")]
        search: String,

        /// Class 10, Class 12, higher education, Class 9 or all
        #[arg(long, default_value = "all", value_parser = selection::<String>)]
        level: Selection<String>,
    },

    /// Show the filter options available for a collection
    Facets {
        #[arg(value_enum)]
        resource: Resource,
    },

    /// Sign in with email and password, or through a social provider
    Login {
        #[arg(long, required_unless_present = "with")]
        email: Option<String>,

        #[arg(long, required_unless_present = "with")]
        password: Option<String>,

        #[arg(long, value_enum, conflicts_with_all = ["email", "password"])]
        with: Option<Social>,
    },

    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long)]
        display_name: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Update the signed-in user's profile
    Profile {
        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Ask the chat assistant
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Course of study, used to tailor the answer
        #[arg(long)]
        course: Option<String>,

        #[arg(long)]
        college: Option<String>,

        #[arg(long)]
        semester: Option<String>,
    },

    /// Validate configuration and bundled data
    Validate,

    /// Print the effective configuration
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Resource {
    Colleges,
    Courses,
    Exams,
    Ebooks,
    Scholarships,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Social {
    Google,
    Github,
}

impl From<Social> for AuthProvider {
    fn from(social: Social) -> Self {
        match social {
            Social::Google => AuthProvider::Google,
            Social::Github => AuthProvider::Github,
        }
    }
}

fn selection<T>(raw: &str) -> Result<Selection<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Selection::from_str(raw)
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load a view through its provider, then apply the requested filter.
async fn open_view<F, P>(
    provider: &P,
    screen: Screen,
    search: &str,
    filter: F,
) -> Result<ListView<F>>
where
    F: ListFilter,
    P: ResourceProvider<F::Item>,
{
    let mut view: ListView<F> = ListView::new();
    view.load_from(provider).await?;
    view.update(|current| {
        *current = filter;
        current.set_search(search);
    });

    log::debug!("{} view {} ({})", screen, view.state(), view.summary());
    Ok(view)
}

fn print_header<F: ListFilter>(title: &str, view: &ListView<F>) {
    println!("{title}: {}", view.summary());
    if view.filter().search().is_active() {
        println!("Search: \"{}\"", view.filter().search().as_str());
    }
    println!();
}

fn print_empty<F: ListFilter>(view: &ListView<F>, what: &str) -> bool {
    if view.state() == ViewState::Empty {
        println!("No {what} found. Try adjusting your search or filters.");
        return true;
    }
    false
}

fn print_college(college: &College, config: &Config) {
    let kind = college
        .college_type()
        .map(|k| format!(" [{k}]"))
        .unwrap_or_default();
    let rank = college
        .nirf_rank()
        .map(|r| format!("  NIRF #{r}"))
        .unwrap_or_default();
    println!("{}{kind}{rank}", college.display_name());
    println!("  {}", college.display_location());

    let streams: Vec<&str> = college.streams.iter().filter_map(|s| s.label()).collect();
    if !streams.is_empty() {
        println!(
            "  Streams: {}",
            chips(&streams, config.display.max_streams, Overflow::More).join(", ")
        );
    }
    println!(
        "  Fees: {}  Avg package: {}",
        format_inr(college.total_fees()),
        format_inr(college.average_package())
    );
    if !college.facilities.is_empty() {
        println!(
            "  Facilities: {}",
            chips(&college.facilities, config.display.max_facilities, Overflow::Count).join(", ")
        );
    }
    let contact: Vec<String> = college
        .phone()
        .map(str::to_string)
        .into_iter()
        .chain(college.website().and_then(display_host))
        .collect();
    if !contact.is_empty() {
        println!("  Contact: {}", contact.join("  "));
    }
}

fn print_fields(fields: &[FieldOfStudy]) {
    for field in fields {
        println!("{} ({} courses)", field.field_name, field.courses.len());
        for course in &field.courses {
            println!(
                "  {} ({}), {}",
                course.course_name, course.abbreviation, course.duration
            );
            if !course.eligibility.is_empty() {
                println!("    Eligibility: {}", course.eligibility);
            }
            if !course.career_paths.is_empty() {
                println!("    Careers: {}", course.career_paths.join(", "));
            }
        }
    }
}

fn print_categories(categories: &[ExamCategory]) {
    for category in categories {
        println!("{} ({} exams)", category.category_name, category.exam_count());
        for sub in &category.sub_categories {
            println!("  {}", sub.sub_category_name);
            for exam in &sub.exams {
                println!(
                    "    {} ({}), {}",
                    exam.name, exam.abbreviation, exam.conducting_body
                );
                if !exam.purpose.is_empty() {
                    println!("      {}", truncate(&exam.purpose, 100));
                }
            }
        }
    }
}

fn print_ebook(ebook: &Ebook, index: usize, config: &Config) {
    let year = ebook.year.map(|y| y.to_string()).unwrap_or_default();
    let verified = if ebook.metadata.verified { "  verified" } else { "" };
    println!("{} by {}", ebook.title, ebook.author);
    println!(
        "  {}  {}  {}  popularity {}{verified}",
        ebook.subject, year, ebook.publisher, ebook.popularity()
    );
    if let Some(cover) = ebook.cover_image(index, &config.display.covers) {
        println!("  Cover: {cover}");
    }
}

fn print_scholarship(scholarship: &Scholarship) {
    println!("{}", scholarship.name);
    println!("  Level: {}", scholarship.level);
    println!("  Eligibility: {}", scholarship.eligibility);
    if !scholarship.link.is_empty() {
        println!("  Apply: {}", scholarship.link);
    }
}

fn print_options<T: std::fmt::Display>(label: &str, options: &[T]) {
    println!("{label}:");
    for option in options {
        println!("  {option}");
    }
}

async fn open_session(config: &Config) -> Result<LocalSessionProvider<JsonFileStore>> {
    let store = JsonFileStore::new(&config.session.store_path);
    LocalSessionProvider::restore(store, config.session.clone()).await
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(&cli.config)?;
    if cli.instant {
        config.loading.delay_ms = 0;
        config.loading.scholarship_delay_ms = 0;
        config.session = config.session.instant();
    }
    log::info!("Loaded configuration from {}", cli.config.display());

    let sources = CatalogSources::from_config(&config);

    match cli.command {
        Command::Colleges { search, kind, state } => {
            let filter = CollegeFilter {
                kind,
                state,
                ..CollegeFilter::default()
            };
            let view = open_view(&sources.colleges, Screen::Colleges, &search, filter).await?;
            print_header("Colleges", &view);
            if !print_empty(&view, "colleges") {
                for college in view.visible() {
                    print_college(college, &config);
                    println!();
                }
            }
        }

        Command::Courses {
            search,
            field,
            duration,
        } => {
            let filter = CourseFilter {
                field,
                duration,
                ..CourseFilter::default()
            };
            let view = open_view(&sources.courses, Screen::Courses, &search, filter).await?;
            print_header("Courses", &view);
            if !print_empty(&view, "courses") {
                print_fields(view.visible());
            }
        }

        Command::Exams {
            search,
            category,
            sub_category,
        } => {
            let filter = ExamFilter {
                category,
                sub_category,
                ..ExamFilter::default()
            };
            let view = open_view(&sources.exams, Screen::Exams, &search, filter).await?;
            print_header("Exams", &view);
            if !print_empty(&view, "exams") {
                print_categories(view.visible());
            }
        }

        Command::Ebooks {
            search,
            subject,
            year,
        } => {
            let filter = EbookFilter {
                subject,
                year,
                ..EbookFilter::default()
            };
            let view = open_view(&sources.ebooks, Screen::Ebooks, &search, filter).await?;
            print_header("Ebooks", &view);
            if !print_empty(&view, "ebooks") {
                let source = view.source().unwrap_or_default();
                for ebook in view.visible() {
                    // Covers are keyed by position in the source collection
                    let index = source
                        .iter()
                        .position(|e| e.ebook_id == ebook.ebook_id)
                        .unwrap_or(0);
                    print_ebook(ebook, index, &config);
                    println!();
                }
            }
        }

        Command::Scholarships { search, level } => {
            let filter = ScholarshipFilter {
                level,
                ..ScholarshipFilter::default()
            };
            let view =
                open_view(&sources.scholarships, Screen::Scholarships, &search, filter).await?;
            print_header("Scholarships", &view);
            if !print_empty(&view, "scholarships") {
                for scholarship in view.visible() {
                    print_scholarship(scholarship);
                    println!();
                }
            }
        }

        Command::Facets { resource } => match resource {
            Resource::Colleges => {
                let colleges = sources.colleges.load().await?;
                print_options("Types", &facets::college_types(&colleges));
                print_options("States", &facets::college_states(&colleges));
            }
            Resource::Courses => {
                let fields = sources.courses.load().await?;
                let options: Vec<String> = facets::course_fields(&fields)
                    .into_iter()
                    .map(|(id, name)| format!("{id} ({name})"))
                    .collect();
                print_options("Fields", &options);
                print_options("Durations", &facets::course_durations(&fields));
            }
            Resource::Exams => {
                let categories = sources.exams.load().await?;
                print_options("Categories", &facets::exam_categories(&categories));
                print_options("Sub-categories", &facets::exam_sub_categories(&categories));
            }
            Resource::Ebooks => {
                let ebooks = sources.ebooks.load().await?;
                print_options("Subjects", &facets::ebook_subjects(&ebooks));
                print_options("Years", &facets::ebook_years(&ebooks));
            }
            Resource::Scholarships => {
                print_options("Levels", &facets::scholarship_levels());
            }
        },

        Command::Login {
            email,
            password,
            with,
        } => {
            let session = open_session(&config).await?;
            let user = match (with, email, password) {
                (Some(social), _, _) => session.sign_in_with(social.into()).await?,
                (None, Some(email), Some(password)) => session.login(&email, &password).await?,
                _ => return Err(AppError::auth("Email and password are required")),
            };
            println!("Signed in as {} <{}> via {}", user.display_name, user.email, user.provider);
        }

        Command::Signup {
            email,
            password,
            first_name,
            last_name,
            phone,
            display_name,
        } => {
            let session = open_session(&config).await?;
            let details = SignupDetails {
                display_name,
                first_name,
                last_name,
                phone,
            };
            let user = session.signup(&email, &password, details).await?;
            println!("Welcome, {}! Your account is ready.", user.display_name);
        }

        Command::Logout => {
            let session = open_session(&config).await?;
            if session.current_user().is_none() {
                println!("Not signed in.");
            } else {
                session.logout().await?;
                println!("Signed out.");
            }
        }

        Command::Whoami => {
            let session = open_session(&config).await?;
            match session.current_user() {
                Some(user) => {
                    println!("{} <{}>", user.display_name, user.email);
                    println!("  Provider: {}", user.provider);
                    if !user.phone.is_empty() {
                        println!("  Phone: {}", user.phone);
                    }
                    println!("  Last login: {}", user.last_login_at.format("%Y-%m-%d %H:%M UTC"));
                }
                None => println!("Not signed in."),
            }
        }

        Command::Profile {
            display_name,
            first_name,
            last_name,
            phone,
        } => {
            let session = open_session(&config).await?;
            let update = ProfileUpdate {
                display_name,
                first_name,
                last_name,
                phone,
                photo_url: None,
            };
            let user = session.update_profile(update).await?;
            println!("Profile updated for {}", user.display_name);
        }

        Command::Chat {
            message,
            course,
            college,
            semester,
        } => {
            let assistant = ChatAssistant::new(load_responses(&config)?);
            let session = open_session(&config).await?;
            let message = message.join(" ");

            let profile = session.current_user().map(|user| StudentProfile {
                course: course.unwrap_or_default(),
                college: college.unwrap_or_default(),
                semester: semester.unwrap_or_default(),
                ..StudentProfile::from(&user)
            });

            let reply = assistant.respond(&message, profile.as_ref());
            println!("{}", reply.text);
            if !reply.suggestions.is_empty() {
                println!();
                println!("Try: {}", reply.suggestions.join(" | "));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            println!("✓ Config OK ({})", cli.config.display());

            let responses = load_responses(&config)?;
            println!("✓ Chat responses OK ({} intents)", responses.responses.len());

            let catalog = load_catalog(&config).await?;
            let report = validate_catalog(&catalog);
            if !report.is_ok() {
                for issue in &report.issues {
                    println!("✗ {issue}");
                }
                return Err(AppError::validation(format!(
                    "{} issue(s) in bundled data",
                    report.issues.len()
                )));
            }
            println!("✓ Data OK ({} records checked)", report.checked);

            println!("All validations passed!");
        }

        Command::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
