use crate::render::{self, CELL_SIZE, STATUS_BAR_HEIGHT};
use crate::sound::SoundBank;
use crate::utils::*;
use clap::Args;
use gloo::events::EventListener;
use sweeper_core as game;
use web_sys::{HtmlCanvasElement, HtmlImageElement};
use yew::prelude::*;

/// Path of the texture drawn over exposed mines.
const BOOM_TEXTURE: &str = "assets/boomm.png";

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer { button: game::Button, x: f64, y: f64 },
    TextureLoaded,
}

/// `MouseEvent::button` values, `None` for buttons the game does not use.
pub(crate) fn button_from_event(button: i16) -> Option<game::Button> {
    match button {
        0 => Some(game::Button::Primary),
        2 => Some(game::Button::Secondary),
        _ => None,
    }
}

pub(crate) fn canvas_size(size: game::Coord2) -> (u32, u32) {
    let (rows, cols) = size;
    (
        u32::from(cols) * CELL_SIZE,
        u32::from(rows) * CELL_SIZE + STATUS_BAR_HEIGHT,
    )
}

pub(crate) struct GameView {
    session: game::Session,
    canvas: NodeRef,
    sounds: SoundBank,
    boom_texture: Option<HtmlImageElement>,
    _texture_listener: Option<EventListener>,
}

impl GameView {
    /// Starts loading the mine texture and asks for a redraw once it arrives.
    fn load_texture(ctx: &Context<Self>) -> (Option<HtmlImageElement>, Option<EventListener>) {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(err) => {
                log::error!("failed to create boom texture: {:?}", err);
                return (None, None);
            }
        };

        let link = ctx.link().clone();
        let listener = EventListener::once(&image, "load", move |_| {
            link.send_message(Msg::TextureLoaded);
        });
        image.set_src(BOOM_TEXTURE);
        (Some(image), Some(listener))
    }

    fn on_pointer(&mut self, button: game::Button, x: f64, y: f64) -> bool {
        let size = self.session.board().size();
        let Some(coords) = game::pointer_to_cell(x, y, f64::from(CELL_SIZE), size) else {
            log::trace!("pointer at ({}, {}) is off the grid", x, y);
            return false;
        };

        let cues = self.session.handle(button, coords);
        log::trace!("{:?} at {:?} -> {:?}", button, coords, cues);
        self.sounds.play_all(&cues);
        !cues.is_empty()
    }

    fn draw(&self) {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            log::warn!("canvas is not mounted yet");
            return;
        };

        if let Err(err) = context_2d(&canvas)
            .and_then(|ctx| render::draw_session(&ctx, &self.session, self.boom_texture.as_ref()))
        {
            log::error!("failed to draw board: {:#}", err);
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::info!("starting game with seed {}", seed);

        let session = game::Session::new(game::GameConfig::CLASSIC, seed)
            .expect("built-in game config must be valid");

        let (boom_texture, texture_listener) = Self::load_texture(ctx);

        Self {
            session,
            canvas: NodeRef::default(),
            sounds: SoundBank::default(),
            boom_texture,
            _texture_listener: texture_listener,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Pointer { button, x, y } => self.on_pointer(button, x, y),
            Msg::TextureLoaded => {
                log::debug!("boom texture loaded");
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (width, height) = canvas_size(self.session.board().size());

        let onmousedown = ctx.link().batch_callback(|e: MouseEvent| {
            button_from_event(e.button()).map(|button| Msg::Pointer {
                button,
                x: f64::from(e.offset_x()),
                y: f64::from(e.offset_y()),
            })
        });

        html! {
            <div class="sweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <canvas
                    ref={self.canvas.clone()}
                    width={width.to_string()}
                    height={height.to_string()}
                    {onmousedown}
                />
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            log::debug!("canvas mounted");
        }
        // immediate mode, the whole board is redrawn every time
        self.draw();
    }
}
