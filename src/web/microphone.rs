//! Microphone -> `AnalyserNode` as a [`FrequencySource`].

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, DomException, MediaStream, MediaStreamAudioSourceNode};

use crate::audio::FrequencySource;
use crate::error::AudioError;

/// Live analyser on the default audio input. Holds the context and source
/// node so the graph stays connected for the page lifetime.
pub struct WebAnalyser {
    _context: AudioContext,
    _source: MediaStreamAudioSourceNode,
    analyser: AnalyserNode,
}

impl FrequencySource for WebAnalyser {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn sample(&mut self, bins: &mut [u8]) {
        self.analyser.get_byte_frequency_data(bins);
    }
}

/// Request the microphone and build `source -> analyser` with the given
/// window size.
pub async fn acquire(window: &web_sys::Window, fft_size: u32) -> Result<WebAnalyser, AudioError> {
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| AudioError::Unsupported)?;
    let has_gum = js_sys::Reflect::get(&devices, &JsValue::from_str("getUserMedia"))
        .map(|f| f.is_function())
        .unwrap_or(false);
    if !has_gum {
        return Err(AudioError::Unsupported);
    }

    let constraints = web_sys::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(classify)?;
    let stream: MediaStream = JsFuture::from(promise)
        .await
        .map_err(classify)?
        .dyn_into()
        .map_err(|_| AudioError::DeviceUnavailable("getUserMedia did not return a MediaStream".into()))?;

    build_graph(&stream, fft_size).map_err(classify)
}

fn build_graph(stream: &MediaStream, fft_size: u32) -> Result<WebAnalyser, JsValue> {
    let context = AudioContext::new()?;
    let analyser = context.create_analyser()?;
    let source = context.create_media_stream_source(stream)?;
    source.connect_with_audio_node(&analyser)?;
    analyser.set_fft_size(fft_size);
    Ok(WebAnalyser { _context: context, _source: source, analyser })
}

fn classify(err: JsValue) -> AudioError {
    match err.dyn_ref::<DomException>() {
        Some(dom) => AudioError::from_dom_exception(&dom.name(), &dom.message()),
        None => AudioError::DeviceUnavailable(format!("{:?}", err)),
    }
}
