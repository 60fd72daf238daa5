mod cli;
mod convolution_plotter;
mod headless;

use crate::cli::Args;
use crate::convolution_plotter::ConvolutionPlotter;
use clap::Parser;
use eframe::Frame;
use signal_convolutor::Settings;
use simple_logger::SimpleLogger;
use std::error::Error;

struct App {
    convolution_plotter: ConvolutionPlotter,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.convolution_plotter.render(ctx);
    }
}

impl App {
    fn new(settings: Settings) -> Self {
        App {
            convolution_plotter: ConvolutionPlotter::new(settings),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    SimpleLogger::new().with_level(args.log_level()).init()?;

    let settings = args.settings();
    log::info!("Starting with {:?}", settings);

    if args.headless {
        let status = headless::run(settings, args.format, args.start, args.stop)?;
        log::info!("Finished: {:?}", status);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1250.0, 750.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Signal Convolutor",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(settings)))),
    )?;

    Ok(())
}
