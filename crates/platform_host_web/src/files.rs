//! Conversion of picker `FileList`s into [`CandidateFile`] batches.

use platform_host::CandidateFile;

/// Reads every file of `files` into memory, preserving picker order.
///
/// # Errors
///
/// Returns an error when any file cannot be read. Off wasm32 this always fails.
pub async fn read_file_list(files: &web_sys::FileList) -> Result<Vec<CandidateFile>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        let picked = (0..files.length())
            .filter_map(|index| files.get(index))
            .collect::<Vec<_>>();
        futures::future::try_join_all(picked.iter().map(read_file)).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = files;
        Err("file reading is only available when compiled for wasm32".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_file(file: &web_sys::File) -> Result<CandidateFile, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("failed to read {}: {err:?}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(CandidateFile::new(file.name(), file.type_(), bytes))
}
