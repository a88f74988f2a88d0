use dioxus::prelude::*;

use domain::storage::{content_type, MAX_UPLOAD_BYTES};
use domain::StorageBucket;

use crate::components::{use_toast, ToastOptions};

/// What a successful upload hands back to the form.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub url: String,
    pub file_name: String,
    pub size: i64,
    pub file_type: String,
}

/// File picker that uploads straight to a storage bucket.
#[component]
pub fn FileUpload(
    id: String,
    bucket: StorageBucket,
    #[props(default)] accept: Option<String>,
    on_uploaded: EventHandler<UploadedFile>,
) -> Element {
    let toast = use_toast();
    let mut uploading = use_signal(|| false);

    let onchange = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let file_name = file.name();

        uploading.set(true);
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                toast.error(format!("Could not read {file_name}: {e}"), ToastOptions::new());
                uploading.set(false);
                return;
            }
        };
        if bytes.len() > MAX_UPLOAD_BYTES {
            toast.error("Files must be 50 MB or smaller".to_string(), ToastOptions::new());
            uploading.set(false);
            return;
        }

        let size = bytes.len() as i64;
        match api::upload_file(bucket, file_name.clone(), bytes).await {
            Ok(url) => {
                toast.success(format!("Uploaded {file_name}"), ToastOptions::new());
                on_uploaded.call(UploadedFile {
                    url,
                    file_type: content_type(&file_name).to_string(),
                    file_name,
                    size,
                });
            }
            Err(e) => toast.error(e.to_string(), ToastOptions::new()),
        }
        uploading.set(false);
    };

    rsx! {
        div {
            class: "file-upload",
            input {
                id: "{id}",
                r#type: "file",
                accept: accept.unwrap_or_default(),
                disabled: uploading(),
                onchange: onchange,
            }
            if uploading() {
                span { class: "view-muted", "Uploading..." }
            }
        }
    }
}
