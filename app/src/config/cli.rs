//! Launch argument parsing.
//!
//! One free argument is the message, two are message then title; everything
//! else is spelled out with long options.

use banner_core::request::{parse_scale, parse_ttl};
use banner_core::{BannerPosition, NotificationRequest};

/// What this process launch asked for.
#[derive(Debug, Default)]
pub struct LaunchArgs {
    /// The banner to show, when a non-empty message was given.
    pub request: Option<NotificationRequest>,
}

pub fn parse() -> LaunchArgs {
    build(pico_args::Arguments::from_env())
}

#[cfg(test)]
fn parse_from(args: &[&str]) -> LaunchArgs {
    build(pico_args::Arguments::from_vec(
        args.iter().map(|&s| s.into()).collect(),
    ))
}

fn build(mut args: pico_args::Arguments) -> LaunchArgs {
    let message: Option<String> = opt(&mut args, "--message");
    let title: Option<String> = opt(&mut args, "--title");
    let time: Option<String> = opt(&mut args, "--time");
    let image: Option<String> = opt(&mut args, "--image");
    let position: Option<String> = opt(&mut args, "--position");
    let color: Option<String> = opt(&mut args, "--color");
    let sound: Option<String> = opt(&mut args, "--sound");
    let size: Option<String> = opt(&mut args, "--size");
    let exit = args.contains("--exit");
    let primary = args.contains("--primary");
    let important = args.contains("--important");

    let free: Vec<String> = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .filter(|s| !s.starts_with('-'))
        .collect();

    let mut request = NotificationRequest::new(
        message.or_else(|| free.first().cloned()).unwrap_or_default(),
    );
    if let Some(title) = title.or_else(|| free.get(1).cloned()) {
        request.title = title;
    }
    if let Some(time) = time {
        request.ttl_seconds = parse_ttl(&time);
    }
    if let Some(position) = position {
        request.position = BannerPosition::parse(&position);
    }
    request.exit_after_show = exit;
    request.use_primary_screen = primary;
    request.important = important;
    request.hints.image = image;
    request.hints.color = color;
    request.hints.sound = sound;
    if let Some(size) = size {
        request.hints.scale_percent = parse_scale(&size);
    }

    let request = request.has_message().then_some(request);
    LaunchArgs { request }
}

fn opt(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    args.opt_value_from_str(key).unwrap_or(None)
}
