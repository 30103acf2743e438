//! Binds an upload form to its endpoint: one request per submission, busy
//! state for the duration of the request, and a notification when it settles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, error, info};

use crate::analysis::{JobDescriptionResponse, ResumeResponse};
use crate::api_error;
use crate::errors::ClientError;
use crate::form::{UploadForm, UploadRequest};
use crate::notify::{Level, NotificationArea};
use crate::render::{render_analysis, ResultsContainer};

/// Raw outcome of one request as seen by the coordinator.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub endpoint_url: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries an `UploadRequest` to the server. `RecruitAPIClient` is the real
/// implementation.
pub trait Transport {
    fn send(&self, request: UploadRequest) -> Result<TransportResponse, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: UploadRequest) -> Result<TransportResponse, ClientError> {
        (**self).send(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    JobDescription,
    Resume,
}

impl UploadKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            UploadKind::JobDescription => "/api/job-description",
            UploadKind::Resume => "/api/resume",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            UploadKind::JobDescription => "Job description uploaded and analyzed successfully!",
            UploadKind::Resume => "Resume uploaded and analyzed successfully!",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            UploadKind::JobDescription => "Failed to upload job description. Please try again.",
            UploadKind::Resume => "Failed to upload resume. Please try again.",
        }
    }
}

/// The parts of a page an upload touches. Every element is optional except
/// the notification area.
#[derive(Debug, Default)]
pub struct UploadPage {
    pub form: Option<UploadForm>,
    pub results: Option<ResultsContainer>,
    pub notifications: NotificationArea,
    /// Navigation targets requested so far, oldest first.
    pub navigations: Vec<String>,
}

impl UploadPage {
    pub fn with_form(form: UploadForm) -> UploadPage {
        UploadPage {
            form: Some(form),
            ..UploadPage::default()
        }
    }

    pub fn results(mut self, container: ResultsContainer) -> UploadPage {
        self.results = Some(container);
        self
    }
}

#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> SubmitEvent {
        SubmitEvent::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug)]
pub enum UploadSuccess {
    JobDescription(JobDescriptionResponse),
    Resume(ResumeResponse),
}

#[derive(Debug)]
pub enum UploadOutcome {
    /// The page has no form for this coordinator.
    NotBound,
    /// A previous submission is still waiting for its response.
    AlreadyInFlight,
    Succeeded(UploadSuccess),
    Failed(ClientError),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Succeeded(_))
    }
}

/// Keeps the form busy while alive. Dropping it, on any path including
/// unwinding, returns the form to idle.
pub(crate) struct BusyGuard<'a> {
    form: &'a mut UploadForm,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn enter(form: &'a mut UploadForm) -> BusyGuard<'a> {
        form.set_busy(true);
        BusyGuard { form }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.form.set_busy(false);
    }
}

struct InFlightToken<'a>(&'a AtomicBool);

impl<'a> InFlightToken<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<InFlightToken<'a>> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightToken(flag))
    }
}

impl Drop for InFlightToken<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct UploadCoordinator<T: Transport> {
    kind: UploadKind,
    transport: T,
    in_flight: AtomicBool,
}

impl<T: Transport> UploadCoordinator<T> {
    pub fn new(kind: UploadKind, transport: T) -> UploadCoordinator<T> {
        UploadCoordinator {
            kind,
            transport,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn submit(&self, page: &mut UploadPage, event: &mut SubmitEvent) -> UploadOutcome {
        let Some(form) = page.form.as_mut() else {
            return UploadOutcome::NotBound;
        };
        event.prevent_default();

        let Some(_token) = InFlightToken::acquire(&self.in_flight) else {
            debug!(endpoint = self.kind.endpoint(), "submission ignored, request in flight");
            return UploadOutcome::AlreadyInFlight;
        };

        let request = match form.snapshot(self.kind.endpoint()) {
            Ok(request) => request,
            Err(e) => return self.fail(&mut page.notifications, e),
        };

        let settled = {
            let _busy = BusyGuard::enter(form);
            debug!(
                endpoint = request.endpoint,
                fields = request.fields.len(),
                has_file = request.file.is_some(),
                "sending upload"
            );
            self.exchange(request).and_then(|response| {
                self.apply(
                    &response,
                    page.results.as_mut(),
                    &mut page.notifications,
                    &mut page.navigations,
                )
            })
        };

        match settled {
            Ok(success) => UploadOutcome::Succeeded(success),
            Err(e) => self.fail(&mut page.notifications, e),
        }
    }

    fn exchange(&self, request: UploadRequest) -> Result<TransportResponse, ClientError> {
        let response = self.transport.send(request)?;
        debug!(
            endpoint = %response.endpoint_url,
            status = response.status,
            "upload settled"
        );
        if !response.is_success() {
            return Err(api_error(
                response.endpoint_url,
                response.status,
                &response.body,
            ));
        }
        Ok(response)
    }

    fn apply(
        &self,
        response: &TransportResponse,
        results: Option<&mut ResultsContainer>,
        notifications: &mut NotificationArea,
        navigations: &mut Vec<String>,
    ) -> Result<UploadSuccess, ClientError> {
        let success = match self.kind {
            UploadKind::JobDescription => {
                let body: JobDescriptionResponse = serde_json::from_slice(&response.body)?;
                if let Some(analysis) = body.analysis() {
                    render_analysis(results, &analysis);
                }
                notifications.show(Level::Success, self.kind.success_message(), Instant::now());
                UploadSuccess::JobDescription(body)
            }
            UploadKind::Resume => {
                let body: ResumeResponse = serde_json::from_slice(&response.body)?;
                notifications.show(Level::Success, self.kind.success_message(), Instant::now());
                if let Some(target) = body.redirect.as_deref().filter(|t| !t.is_empty()) {
                    navigations.push(target.to_string());
                }
                UploadSuccess::Resume(body)
            }
        };
        info!(endpoint = self.kind.endpoint(), "upload succeeded");
        Ok(success)
    }

    fn fail(&self, notifications: &mut NotificationArea, e: ClientError) -> UploadOutcome {
        error!(endpoint = self.kind.endpoint(), error = %e, "upload failed");
        notifications.show(Level::Danger, self.kind.failure_message(), Instant::now());
        UploadOutcome::Failed(e)
    }
}
