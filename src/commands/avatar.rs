use tauri::State;

use crate::{app::state::FrontendState, infrastructure::http::texture_loader::ImageSource};

/// Returns the avatar as a `data:image/png;base64,...` URI ready for `<img src>`.
#[tauri::command]
pub async fn render_avatar(
    state: State<'_, FrontendState>,
    src: String,
    size: u32,
) -> Result<String, String> {
    let source = ImageSource::parse(&src);
    let avatar = state.avatars.render_avatar(&source, size).await?;
    Ok(avatar.to_data_url())
}

#[tauri::command]
pub async fn render_avatar_png(
    state: State<'_, FrontendState>,
    bytes: Vec<u8>,
    size: u32,
) -> Result<Vec<u8>, String> {
    let avatar = state
        .avatars
        .render_avatar(&ImageSource::Bytes(bytes), size)
        .await?;
    Ok(avatar.bytes)
}
