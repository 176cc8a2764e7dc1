//! Trainer CLI: fits the scaler and classifier from a labeled CSV and
//! persists the artifacts the inference service loads at startup.

use std::path::PathBuf;

use heartrisk::artifacts::{MODEL_DIR, save_artifacts};
use heartrisk::dataset::loader::load_csv;
use heartrisk::dataset::split::train_test_split;
use heartrisk::ml::logreg::{TrainDataset, TrainOptions, train_logreg};
use heartrisk::ml::metrics::BinaryConfusion;
use heartrisk::ml::scaler::StandardScaler;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;

    let dataset = load_csv(&options.csv_path).map_err(|err| err.to_string())?;
    let (train, test) =
        train_test_split(&dataset, options.test_fraction, options.seed)?;

    // Scaler statistics come from the training split only.
    let scaler = StandardScaler::fit(&train.x)?;
    let train_scaled = scaler
        .transform_rows(&train.x)
        .ok_or_else(|| "Scaler/train dimension mismatch".to_string())?;
    let test_scaled = scaler
        .transform_rows(&test.x)
        .ok_or_else(|| "Scaler/test dimension mismatch".to_string())?;

    let mut train_options = TrainOptions::default();
    train_options.epochs = options.epochs;
    train_options.learning_rate = options.learning_rate;
    train_options.l2 = options.l2;
    train_options.batch_size = options.batch_size.max(1);
    train_options.seed = options.seed;

    let model = train_logreg(
        &TrainDataset {
            x: train_scaled.clone(),
            y: train.y.clone(),
        },
        &train_options,
    )?;

    let cm = evaluate(&model, &test_scaled, &test.y);
    println!(
        "Model training completed; test accuracy: {:.2}%",
        cm.accuracy() * 100.0
    );
    println!(
        "positive class  precision={:.3}  recall={:.3}  support={}",
        cm.precision(),
        cm.recall(),
        cm.support(1)
    );
    println!(
        "confusion: tp={} fp={} tn={} fn={}",
        cm.true_positive, cm.false_positive, cm.true_negative, cm.false_negative
    );

    save_artifacts(&options.out_dir, &model, &scaler, &train_scaled, &train.y)
        .map_err(|err| err.to_string())?;
    println!("Artifacts saved to {}", options.out_dir.display());

    Ok(())
}

fn evaluate(
    model: &heartrisk::ml::logreg::LogRegModel,
    rows: &[Vec<f32>],
    labels: &[u8],
) -> BinaryConfusion {
    let mut cm = BinaryConfusion::default();
    for (row, &truth) in rows.iter().zip(labels.iter()) {
        let Some(predicted) = model.predict(row) else {
            continue;
        };
        cm.add(truth, predicted);
    }
    cm
}

#[derive(Debug, Clone)]
struct CliOptions {
    csv_path: PathBuf,
    out_dir: PathBuf,
    epochs: usize,
    learning_rate: f32,
    l2: f32,
    batch_size: usize,
    seed: u64,
    test_fraction: f32,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut csv_path = PathBuf::from("dataset/heart.csv");
    let mut out_dir = PathBuf::from(MODEL_DIR);
    let mut epochs = 200usize;
    let mut learning_rate = 0.1f32;
    let mut l2 = 1e-4f32;
    let mut batch_size = 32usize;
    let mut seed = 42u64;
    let mut test_fraction = 0.2f32;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--csv" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--csv requires a value".to_string())?;
                csv_path = PathBuf::from(value);
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                out_dir = PathBuf::from(value);
            }
            "--epochs" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--epochs requires a value".to_string())?;
                epochs = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --epochs value: {value}"))?;
            }
            "--learning-rate" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--learning-rate requires a value".to_string())?;
                learning_rate = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid --learning-rate value: {value}"))?;
            }
            "--l2" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--l2 requires a value".to_string())?;
                l2 = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid --l2 value: {value}"))?;
            }
            "--batch-size" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--batch-size requires a value".to_string())?;
                batch_size = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid --batch-size value: {value}"))?;
            }
            "--seed" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid --seed value: {value}"))?;
            }
            "--test-fraction" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--test-fraction requires a value".to_string())?;
                test_fraction = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid --test-fraction value: {value}"))?;
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    Ok(CliOptions {
        csv_path,
        out_dir,
        epochs,
        learning_rate,
        l2,
        batch_size,
        seed,
        test_fraction,
    })
}

fn help_text() -> String {
    [
        "heartrisk-train",
        "",
        "Trains the heart-disease logistic regression classifier from a labeled CSV",
        "and writes the scaler/classifier artifacts the service loads at startup.",
        "",
        "Usage:",
        "  heartrisk-train [--csv dataset/heart.csv] [--out model] [options]",
        "",
        "Options:",
        "  --csv <file>           Labeled CSV with a `target` column (default: dataset/heart.csv).",
        "  --out <dir>            Artifact output directory (default: model).",
        "  --epochs <n>           Epoch count (default: 200).",
        "  --learning-rate <f32>  Learning rate (default: 0.1).",
        "  --l2 <f32>             L2 regularization (default: 1e-4).",
        "  --batch-size <n>       Batch size (default: 32).",
        "  --seed <u64>           RNG seed for split and init (default: 42).",
        "  --test-fraction <f32>  Held-out fraction (default: 0.2).",
    ]
    .join("\n")
}
