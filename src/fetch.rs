use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ExportError;

/// A roster stored on local disk for the duration of a run.
///
/// The file is removed when the guard is dropped, on success and on every
/// early return alike.
#[derive(Debug)]
pub struct DownloadedFile {
    path: PathBuf,
}

impl DownloadedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DownloadedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed downloaded file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(
                path = %self.path.display(),
                error = %err,
                "failed to remove downloaded file"
            ),
        }
    }
}

/// Downloads `url` and stores the body at `dest`.
///
/// Any non-success status aborts with [`ExportError::Status`]; there is no retry.
pub async fn download_document(
    client: &reqwest::Client,
    url: &str,
    dest: PathBuf,
) -> Result<DownloadedFile, ExportError> {
    info!(url, "downloading roster");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ExportError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ExportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|source| ExportError::Fetch {
        url: url.to_string(),
        source,
    })?;

    // Guard first, so a partial write is cleaned up too.
    let file = DownloadedFile { path: dest };
    tokio::fs::write(file.path(), &body)
        .await
        .map_err(|source| ExportError::Store {
            url: url.to_string(),
            path: file.path().to_path_buf(),
            source,
        })?;

    info!(
        url,
        path = %file.path().display(),
        bytes = body.len(),
        "stored roster"
    );
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("congress-contacts-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn stores_body_and_removes_it_on_drop() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/legislators-current.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("- id:\n    bioguide: A1\n"))
            .expect(1)
            .mount(&server)
            .await;

        let dir = scratch_dir();
        let dest = dir.join("legislators-current.yaml");
        let url = format!("{}/legislators-current.yaml", server.uri());

        let file = download_document(&reqwest::Client::new(), &url, dest.clone())
            .await
            .unwrap();
        assert_eq!(file.path(), dest.as_path());
        assert_eq!(
            std::fs::read_to_string(&dest).unwrap(),
            "- id:\n    bioguide: A1\n"
        );

        drop(file);
        assert!(!dest.exists());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = scratch_dir();
        let dest = dir.join("missing.yaml");
        let url = format!("{}/missing.yaml", server.uri());

        let err = download_document(&reqwest::Client::new(), &url, dest.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Status { status: 404, .. }));
        assert_eq!(err.stage(), "fetch");
        assert!(!dest.exists());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let url = format!("http://127.0.0.1:{port}/legislators-current.yaml");

        let dir = scratch_dir();
        let dest = dir.join("legislators-current.yaml");
        let err = download_document(&reqwest::Client::new(), &url, dest.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Fetch { .. }));
        assert_eq!(err.stage(), "fetch");
        assert!(!dest.exists());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn unwritable_destination_is_a_store_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let dest = std::env::temp_dir()
            .join(format!("congress-contacts-{}", Uuid::new_v4()))
            .join("nested")
            .join("roster.yaml");
        let url = format!("{}/roster.yaml", server.uri());

        let err = download_document(&reqwest::Client::new(), &url, dest)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Store { .. }));
    }
}
