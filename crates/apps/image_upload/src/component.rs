use std::rc::Rc;

use game_app_contract::{Destination, GameSession, Navigator};
use leptos::*;
use platform_host::HostServices;
use platform_host_web::{build_host_services, read_file_list};

use crate::{
    config::UploadConfig, error::UploadError, state::UploadState, UploadCommit, UploadWorkflow,
};

#[component]
/// Image upload screen.
///
/// Accepted files and staged records live in the shell-owned [`GameSession`]; previews are
/// local to the screen and cleared when it unmounts.
pub fn ImageUploadPage(
    /// Session signals shared with the shell and the game screen.
    session: GameSession,
    /// Navigation callback provided by the shell.
    #[prop(into)]
    on_navigate: Callback<Destination>,
    /// Configuration override; defaults to the build environment.
    #[prop(optional)]
    config: Option<UploadConfig>,
    /// Host services override; defaults to the adapters selected for this build.
    #[prop(optional)]
    services: Option<HostServices>,
) -> impl IntoView {
    let config = config.unwrap_or_else(UploadConfig::from_build_env);
    let services = services.unwrap_or_else(|| {
        build_host_services(config.endpoints.clone(), config.request_timeout_ms)
    });
    let max_images = config.max_images;
    let test_mode_enabled = config.test_mode_enabled;
    let workflow = Rc::new(UploadWorkflow::new(config, services));

    let previews = create_rw_signal(Vec::<String>::new());
    let is_loading = create_rw_signal(false);
    let notice = create_rw_signal::<Option<String>>(None);

    let snapshot = move || UploadState {
        accepted: session.uploaded_images.get_untracked(),
        previews: previews.get_untracked(),
        image_data: session.image_data.get_untracked(),
    };
    let publish = move |state: UploadState| {
        session.uploaded_images.set(state.accepted);
        previews.set(state.previews);
        session.image_data.set(state.image_data);
    };
    let at_capacity = move || session.uploaded_images.with(|files| files.len() >= max_images);

    let upload_workflow = workflow.clone();
    let on_change = move |ev: ev::Event| {
        if is_loading.get_untracked() {
            return;
        }
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(files) = input.files() else {
            return;
        };
        let workflow = upload_workflow.clone();
        let ticket = workflow.begin_upload();
        is_loading.set(true);
        notice.set(None);
        spawn_local(async move {
            let batch = read_file_list(&files).await;
            input.set_value("");
            let batch = match batch {
                Ok(batch) => batch,
                Err(message) => {
                    logging::warn!("reading selected files failed: {message}");
                    notice.set(Some(UploadError::ReadFailed { message }.to_string()));
                    is_loading.set(false);
                    return;
                }
            };

            let session_id = session.session_id.get_untracked();
            match workflow
                .commit_upload(ticket, snapshot(), &session_id, batch)
                .await
            {
                Ok(UploadCommit::Publish { state, report }) => {
                    publish(state);
                    notice.set(report.message());
                }
                Ok(UploadCommit::Superseded) => {}
                Err(err) => notice.set(Some(err.to_string())),
            }
            is_loading.set(false);
        });
    };

    let start_workflow = workflow.clone();
    let on_start = move |_| {
        let workflow = start_workflow.clone();
        spawn_local(async move {
            let state = snapshot();
            let session_id = session.session_id.get_untracked();
            if let Err(err) = workflow.start_game(&state, &session_id, &on_navigate).await {
                notice.set(Some(err.to_string()));
            }
        });
    };

    let back_workflow = workflow.clone();
    let on_back = move |_| {
        let mut state = snapshot();
        back_workflow.go_back(&mut state, &on_navigate);
        publish(state);
    };

    let test_mode_button = test_mode_enabled.then(|| {
        let on_test_mode = move |_| {
            let workflow = workflow.clone();
            spawn_local(async move {
                let mut state = snapshot();
                match workflow.launch_test_mode(&mut state).await {
                    Ok(launch) => {
                        publish(state);
                        let destination = launch.destination();
                        set_timeout(
                            move || on_navigate.navigate(destination),
                            launch.navigate_after,
                        );
                    }
                    Err(err) => notice.set(Some(err.to_string())),
                }
            });
        };
        view! {
            <button
                class="upload-test-mode"
                on:click=on_test_mode
                disabled=move || is_loading.get()
            >
                "Start in test mode"
            </button>
        }
    });

    view! {
        <section class="upload-page">
            <h2>"Upload images"</h2>
            <p class="upload-info">
                {format!("Up to {max_images} images (jpg, jpeg, png)")}
            </p>
            {test_mode_button}
            <input
                id="image-upload-input"
                type="file"
                multiple=true
                accept=".jpg,.jpeg,.png"
                on:change=on_change
                prop:disabled=move || at_capacity() || is_loading.get()
            />
            <label for="image-upload-input">
                {move || if at_capacity() { "Maximum reached" } else { "+ Upload images" }}
            </label>
            {move || {
                is_loading
                    .get()
                    .then(|| view! { <div class="upload-loading">"Uploading..."</div> })
            }}
            <p class="upload-notice" role="status">{move || notice.get()}</p>
            <div class="upload-previews">
                {move || {
                    previews
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, src)| {
                            let label = index + 1;
                            view! {
                                <figure class="upload-preview">
                                    <img src=src alt=format!("Preview {label}")/>
                                    <figcaption>{label}</figcaption>
                                </figure>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="upload-actions">
                <button on:click=on_back>"Back"</button>
                <button
                    on:click=on_start
                    disabled=move || session.uploaded_images.with(Vec::is_empty)
                >
                    "Start game"
                </button>
            </div>
        </section>
    }
}
