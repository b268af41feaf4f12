use crate::core::ANALYSER_FFT_SIZE;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// Permission denied, no input device, or no `mediaDevices` at all.
    #[error("audio input unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("audio graph error: {0}")]
    AudioGraph(String),
}

#[inline]
fn describe(e: JsValue) -> String {
    format!("{:?}", e)
}

/// Live microphone input exposed as fixed-size time-domain frames.
pub struct MicCapture {
    audio_ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    stream: web::MediaStream,
    _source: web::MediaStreamAudioSourceNode,
    buffer: Vec<f32>,
}

impl MicCapture {
    /// Ask for microphone access and build `source -> analyser`.
    pub async fn open() -> Result<Self, CaptureError> {
        let stream = request_audio_stream().await?;
        match build_graph(&stream) {
            Ok((audio_ctx, analyser, source)) => {
                let buffer = vec![0.0; analyser.fft_size() as usize];
                log::info!(
                    "[mic] capture started: {} Hz, frame {}",
                    audio_ctx.sample_rate(),
                    buffer.len()
                );
                Ok(Self {
                    audio_ctx,
                    analyser,
                    stream,
                    _source: source,
                    buffer,
                })
            }
            Err(e) => {
                stop_tracks(&stream);
                Err(e)
            }
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.audio_ctx.sample_rate()
    }

    /// Copy the analyser's current time-domain window into the reusable buffer.
    pub fn read_frame(&mut self) -> &[f32] {
        self.analyser.get_float_time_domain_data(&mut self.buffer);
        &self.buffer
    }

    /// Release the device and the audio context.
    pub fn close(self) {
        stop_tracks(&self.stream);
        _ = self.audio_ctx.close();
        log::info!("[mic] capture stopped");
    }
}

async fn request_audio_stream() -> Result<web::MediaStream, CaptureError> {
    let window =
        web::window().ok_or_else(|| CaptureError::DeviceUnavailable("no window".to_string()))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| CaptureError::DeviceUnavailable(describe(e)))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::FALSE);
    let promise: js_sys::Promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| CaptureError::DeviceUnavailable(describe(e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| CaptureError::DeviceUnavailable(describe(e)))?
        .dyn_into::<web::MediaStream>()
        .map_err(|e| CaptureError::DeviceUnavailable(describe(e)))
}

fn build_graph(
    stream: &web::MediaStream,
) -> Result<
    (
        web::AudioContext,
        web::AnalyserNode,
        web::MediaStreamAudioSourceNode,
    ),
    CaptureError,
> {
    let audio_ctx =
        web::AudioContext::new().map_err(|e| CaptureError::AudioGraph(describe(e)))?;
    _ = audio_ctx.resume();
    let analyser = web::AnalyserNode::new(&audio_ctx)
        .map_err(|e| CaptureError::AudioGraph(describe(e)))?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    let source = audio_ctx
        .create_media_stream_source(stream)
        .map_err(|e| CaptureError::AudioGraph(describe(e)))?;
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| CaptureError::AudioGraph(describe(e)))?;
    Ok((audio_ctx, analyser, source))
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Microphone lifecycle as seen by the mic toggle and the frame loop.
pub enum MicState {
    Off,
    /// `getUserMedia` is pending; further toggles are ignored.
    Starting,
    Running(MicCapture),
}

impl MicState {
    pub fn capture_mut(&mut self) -> Option<&mut MicCapture> {
        match self {
            MicState::Running(capture) => Some(capture),
            _ => None,
        }
    }
}
