use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Write};
use std::rc::Rc;

use gaze_grid::{
    parse_script, run_command, Capability, GazeConfig, GazeTracker, GridCoordinate, InputEvent, Rect,
    ReplayStep, TiltReading, TrackerRegistry,
};

fn shared_log() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |path: &str| sink.borrow_mut().push(path.to_string()))
}

#[test]
fn replay_script_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "# one session\n\
         rect 0 0 256 256\n\
         pointer 128 128\n\
         pointer 256 0\n\
         tilt-on denied\n\
         tilt 10 10\n\
         tilt-on\n\
         tilt 20 -5\n\
         tilt 20 -5\n\
         tilt 35 -5\n\
         touch 0 256\n\
         tilt 99 99"
    )
    .unwrap();

    let commands = parse_script(BufReader::new(File::open(file.path()).unwrap())).unwrap();
    assert_eq!(commands.len(), 11);

    let config = GazeConfig::default();
    let (shown, surface) = shared_log();
    let mut tracker =
        GazeTracker::new(&config, Rect::new(0.0, 0.0, 10.0, 10.0), Box::new(surface)).unwrap();

    let steps: Vec<ReplayStep> = commands.iter().map(|c| run_command(&mut tracker, c)).collect();

    let frames: Vec<GridCoordinate> = steps
        .iter()
        .filter_map(|step| match step {
            ReplayStep::Frame(frame) => Some(frame.coordinate),
            _ => None,
        })
        .collect();
    assert_eq!(
        frames,
        vec![
            GridCoordinate::new(0, 0),
            GridCoordinate::new(15, 15),
            // first tilt reading is the baseline, the repeat stays centered
            GridCoordinate::new(0, 0),
            GridCoordinate::new(0, 0),
            // 15 degrees forward of the baseline is half deflection downward
            GridCoordinate::new(0, -9),
            GridCoordinate::new(-15, -15),
        ]
    );

    let notices = steps
        .iter()
        .filter(|step| matches!(step, ReplayStep::Notice(_)))
        .count();
    assert_eq!(notices, 1);

    assert_eq!(shown.borrow().len(), 6);
    assert_eq!(shown.borrow()[1], "/faces/gaze_px15p0_py15p0_256.webp");
    assert!(!tracker.is_tilt_enabled());
}

#[test]
fn registry_toggles_tilt_for_every_display() {
    let config = GazeConfig {
        asset_base_path: "/eyes/".to_string(),
        image_size: 512,
        ..GazeConfig::default()
    };

    let mut registry = TrackerRegistry::new();
    let mut logs = Vec::new();
    for (name, left) in [("a", 0.0), ("b", 100.0)] {
        let (log, surface) = shared_log();
        let tracker =
            GazeTracker::new(&config, Rect::new(left, 0.0, 100.0, 100.0), Box::new(surface)).unwrap();
        registry.register(name, tracker).unwrap();
        logs.push(log);
    }
    for log in &logs {
        assert_eq!(log.borrow().as_slice(), ["/eyes/gaze_px0p0_py0p0_512.webp"]);
    }

    assert!(registry.request_tilt(&mut || Capability::Unsupported).is_err());
    assert!(!registry.any_tilt_enabled());

    registry.request_tilt(&mut || Capability::Granted).unwrap();
    registry.broadcast(&InputEvent::Orientation(TiltReading::new(0.0, 0.0)));
    let frames = registry.broadcast(&InputEvent::Orientation(TiltReading {
        beta: None,
        gamma: Some(-30.0),
    }));
    assert!(frames
        .iter()
        .all(|(_, frame)| frame.asset_id.as_str() == "gaze_px15p0_py0p0_512.webp"));

    registry.disable_tilt_all();
    assert!(registry
        .broadcast(&InputEvent::Orientation(TiltReading::new(5.0, 5.0)))
        .is_empty());
}
