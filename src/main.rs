use anyhow::{Context, Result};
use clap::Parser;
use comparo::alignment::align;
use comparo::cli::{
    AlignArgs, Cli, Command, DatasetArgs, DescribeArgs, InsightsArgs, OutputFormat, TtestArgs,
};
use comparo::dataset::{CompletionDataset, PromptDataset};
use comparo::insights::{InsightConfig, InsightGenerator};
use comparo::model::{AlignmentResult, StatisticalMetric};
use comparo::report;
use comparo::statistics::{
    approximate_power, descriptive_stats, interpret_p_value, welch_t_test_with, EffectCategory,
};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} JSON: {}", what, path.display()))
}

/// Load the prompt CSV and every completion CSV, then align them
fn align_datasets(args: &DatasetArgs) -> Result<Option<AlignmentResult>> {
    let Some(prompts_path) = &args.prompts else {
        return Ok(None);
    };

    let prompts = PromptDataset::from_csv(prompts_path)
        .with_context(|| format!("Failed to load prompts: {}", prompts_path.display()))?;

    let completions = args
        .completions
        .iter()
        .map(|path| {
            CompletionDataset::from_csv(path)
                .with_context(|| format!("Failed to load completions: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    if completions.len() < 2 {
        tracing::warn!(
            "{} completion dataset(s) given; comparisons need at least two",
            completions.len()
        );
    }

    Ok(Some(align(&prompts, &completions, args.max_rows)))
}

fn run_insights(args: InsightsArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => InsightConfig::from_toml(path)?,
        None => InsightConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.significance_threshold = threshold;
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let metrics: Vec<StatisticalMetric> = match &args.metrics {
        Some(path) => read_json(path, "metrics")?,
        None => Vec::new(),
    };

    let alignment = match &args.alignment {
        Some(path) => Some(read_json::<AlignmentResult>(path, "alignment")?),
        None => align_datasets(&args.datasets)?,
    };

    tracing::debug!(
        metrics = metrics.len(),
        has_alignment = alignment.is_some(),
        "generating insights"
    );

    let alpha = config.significance_threshold;
    let generator = InsightGenerator::with_config(metrics.clone(), alignment, config);
    let insights = generator.generate_insights();

    match args.format {
        OutputFormat::Text => {
            print!("{}", report::render_text(&insights));
            if args.interpret && !metrics.is_empty() {
                print!("{}", report::render_interpretations(&metrics, alpha));
            }
        }
        OutputFormat::Json => println!("{}", report::render_json(&insights)?),
        OutputFormat::Csv => print!("{}", report::render_csv(&insights)?),
    }

    Ok(())
}

fn run_align(args: AlignArgs) -> Result<()> {
    let alignment = align_datasets(&args.datasets)?
        .context("--prompts is required for align")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&alignment).context("Failed to serialize alignment")?
    );
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<()> {
    let stats = descriptive_stats(&args.values);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.count == 0 {
        eprintln!("⚠️  Empty sample: all statistics are zero");
    }
    println!("Count:    {}", stats.count);
    println!("Mean:     {:.4}", stats.mean);
    println!("Std Dev:  {:.4}", stats.std);
    println!("Variance: {:.4}", stats.variance);
    println!("Min:      {:.4}", stats.min);
    println!("Q25:      {:.4}", stats.q25);
    println!("Median:   {:.4}", stats.median);
    println!("Q75:      {:.4}", stats.q75);
    println!("Max:      {:.4}", stats.max);
    Ok(())
}

fn run_ttest(args: TtestArgs) -> Result<()> {
    let test = welch_t_test_with(&args.a, &args.b, args.p_value.into())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&test)?);
        return Ok(());
    }

    println!("t statistic:  {:.4}", test.statistic);
    println!("df:           {:.2}", test.degrees_of_freedom);
    println!(
        "p-value:      {:.4} ({})",
        test.p_value,
        interpret_p_value(test.p_value, 0.05)
    );
    println!(
        "Cohen's d:    {:.4} ({})",
        test.effect_size,
        EffectCategory::from_effect_size(test.effect_size)
    );
    println!(
        "95% CI:       [{:.4}, {:.4}]",
        test.confidence_interval.0, test.confidence_interval.1
    );
    println!(
        "Power (est):  {:.2}",
        approximate_power(test.effect_size, args.a.len(), args.b.len())
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::Insights(args) => run_insights(args),
        Command::Align(args) => run_align(args),
        Command::Describe(args) => run_describe(args),
        Command::Ttest(args) => run_ttest(args),
    }
}
