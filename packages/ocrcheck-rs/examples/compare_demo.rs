use anyhow::Result;
use ocrcheck_rs::prelude::*;

fn main() -> Result<()> {
    let reference = load_reference(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/streetname_reference.json"
    ))?;

    println!("Reference set:");
    for (i, element) in reference.iter().enumerate() {
        let center = element.center()?;
        println!(
            "  {}. '{}' at ({:.1}, {:.1})",
            i + 1,
            element.text,
            center.x,
            center.y
        );
    }
    println!();

    // Simulate a recognition run with typical OCR slips
    let mut current = reference.clone();
    current[1].text = "Nevskiy Prospect".to_string();
    for corner in current[1].bbox.iter_mut() {
        corner[0] += 12.0;
    }
    current.pop();

    // Try a few decay distances to see how position tolerance moves the score
    for decay in [10.0, 50.0, 100.0] {
        let config = ScoringConfig {
            coord_decay_distance: decay,
            ..Default::default()
        };
        let report = Comparator::new(config)?.compare(&current, &reference)?;
        if let Some(aggregate) = report.aggregate {
            println!(
                "decay {:>5.1} px -> overall accuracy {:.1}%",
                decay,
                aggregate.overall_accuracy * 100.0
            );
        }
    }
    println!();

    let report = Comparator::default().compare(&current, &reference)?;
    print!("{}", render_text(&report));

    Ok(())
}
