use crate::utils::*;
use sweeper_core::Cue;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

/// Asset played for each cue.
pub(crate) const fn cue_asset(cue: Cue) -> &'static str {
    match cue {
        Cue::Reveal => "assets/number.mp3",
        Cue::Boom => "assets/boom.mp3",
        Cue::Flag => "assets/flag.mp3",
        Cue::GameOver => "assets/over.mp3",
        Cue::Win => "assets/win.mp3",
    }
}

/// Plays cues through fresh `<audio>` elements so overlapping cues all sound.
/// Assets live in `assets/`, resolved relative to the page.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct SoundBank;

impl SoundBank {
    pub(crate) fn play_all(&self, cues: &[Cue]) {
        for &cue in cues {
            if let Err(err) = self.play(cue) {
                log::warn!("could not play {:?}: {:#}", cue, err);
            }
        }
    }

    fn play(&self, cue: Cue) -> anyhow::Result<()> {
        let audio = HtmlAudioElement::new_with_src(cue_asset(cue)).js_context("new Audio")?;
        let playback = JsFuture::from(audio.play().js_context("play")?);
        spawn_local(async move {
            await_playback(cue, playback).await;
        });
        Ok(())
    }
}

/// Waits on the promise returned by `play()`, which rejects when the browser blocks
/// autoplay or the asset is missing. Returns whether playback started.
pub(crate) async fn await_playback<F>(cue: Cue, playback: F) -> bool
where
    F: Future<Output = Result<JsValue, JsValue>>,
{
    match playback.await {
        Ok(_) => true,
        Err(err) => {
            log::warn!("playback of {:?} rejected: {:?}", cue, err);
            false
        }
    }
}
