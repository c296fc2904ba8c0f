#![windows_subsystem = "windows"]
slint::include_modules!();

use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use git_stare::avatar::{self, AvatarPixels};
use git_stare::error::EMPTY_USERNAME_PROMPT;
use git_stare::view::{ActivityRow as ActivityRowView, ProfileCard};
use git_stare::{lookup, telemetry, Config, GitHubClient, LookupController, LookupState};
use slint::VecModel;
use tracing::{info, warn};

const AVATAR_SIZE: u32 = 128;

type SharedController = Arc<Mutex<LookupController>>;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(&config);
    info!(api_url = %config.api_url, "starting git-stare");

    let github = GitHubClient::new(&config)?;

    // Background tokio runtime for async HTTP
    let rt = Arc::new(tokio::runtime::Runtime::new()?);

    let controller: SharedController = Arc::new(Mutex::new(LookupController::new()));

    let app = AppWindow::new()?;

    // =============================================
    //  CALLBACK: search-requested
    // =============================================
    {
        let app_weak = app.as_weak();
        let controller = controller.clone();
        let github = github.clone();
        let rt = rt.clone();

        app.on_search_requested(move |username| {
            let Some(app) = app_weak.upgrade() else { return };

            let submission = match lock(&controller).submit(username.as_str()) {
                Ok(submission) => submission,
                Err(_) => {
                    app.set_prompt_message(EMPTY_USERNAME_PROMPT.into());
                    app.set_show_prompt(true);
                    return;
                }
            };

            render(&app, lock(&controller).state());

            let app_weak = app_weak.clone();
            let controller = controller.clone();
            let github = github.clone();

            rt.spawn(async move {
                let outcome = lookup::run_lookup(&github, &submission).await;
                let avatar_url = outcome.profile().map(|profile| ProfileCard::from(profile).avatar_url);
                let generation = submission.generation;

                {
                    let app_weak = app_weak.clone();
                    let controller = controller.clone();
                    let _ = slint::invoke_from_event_loop(move || {
                        let Some(app) = app_weak.upgrade() else { return };
                        let mut controller = lock(&controller);
                        if controller.apply(generation, outcome) {
                            app.set_avatar(slint::Image::default());
                            render(&app, controller.state());
                        }
                    });
                }

                // The avatar arrives after the card; a stalled download never holds up the lookup.
                let Some(url) = avatar_url else { return };
                let Some(pixels) =
                    avatar::load_avatar(github.http(), &url, AVATAR_SIZE, &submission.cancel).await
                else {
                    return;
                };

                let _ = slint::invoke_from_event_loop(move || {
                    let Some(app) = app_weak.upgrade() else { return };
                    if lock(&controller).is_current(generation) {
                        set_avatar(&app, pixels);
                    }
                });
            });
        });
    }

    // =============================================
    //  CALLBACK: profile-clicked
    // =============================================
    app.on_profile_clicked(|url| {
        // Open the profile in the native web browser
        if let Err(err) = open::that(url.as_str()) {
            warn!(%url, error = %err, "failed to open profile in browser");
        }
    });

    // Run the Slint event loop
    app.run()?;

    Ok(())
}

fn lock(controller: &SharedController) -> MutexGuard<'_, LookupController> {
    controller.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Pushes the controller state into the window. The avatar is left alone
/// while a profile is shown; it is set separately by [`set_avatar`].
fn render(app: &AppWindow, state: &LookupState) {
    app.set_is_loading(state.loading);
    app.set_error_message(state.error.clone().unwrap_or_default().into());

    match &state.profile {
        Some(user) => {
            let card = ProfileCard::from(user);
            app.set_profile(ProfileView {
                login: card.login.into(),
                display_name: card.display_name.into(),
                bio: card.bio.into(),
                public_repos: card.public_repos.into(),
                public_gists: card.public_gists.into(),
                followers: card.followers.into(),
                following: card.following.into(),
                profile_url: card.profile_url.into(),
            });
            app.set_has_profile(true);
        }
        None => {
            app.set_has_profile(false);
            app.set_avatar(slint::Image::default());
        }
    }

    let rows: Vec<ActivityRow> = state
        .events
        .iter()
        .map(ActivityRowView::from)
        .map(|row| ActivityRow {
            kind: row.kind.into(),
            repo: row.repo.into(),
            commits: row.commits.into(),
            timestamp: row.timestamp.into(),
        })
        .collect();
    app.set_activity(Rc::new(VecModel::from(rows)).into());
}

fn set_avatar(app: &AppWindow, AvatarPixels { rgba, width, height }: AvatarPixels) {
    let buf = slint::SharedPixelBuffer::<slint::Rgba8Pixel>::clone_from_slice(&rgba, width, height);
    app.set_avatar(slint::Image::from_rgba8(buf));
}
