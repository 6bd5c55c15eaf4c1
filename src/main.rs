mod api;
mod app;
mod config;
mod debounce;
mod fields;
mod form;
mod outcome;
mod render;

fn main() {
    yew::Renderer::<app::App>::new().render();
}
