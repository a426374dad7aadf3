use rs_ppl_core::{Corpus, EvaluationSet, ModelConfig, NGramModel, Order};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Training and held-out corpora, as produced by `rs-ppl-split`
    let mut args = std::env::args().skip(1);
    let training_path = args.next().unwrap_or_else(|| "./data/training.txt".to_owned());
    let held_out_path = args.next().unwrap_or_else(|| "./data/dev.txt".to_owned());

    let training = Corpus::from_file(&training_path)?;
    let held_out = Corpus::from_file(&held_out_path)?;

    println!("{:<8} {:<9} {:>14} {:>14}", "order", "smoothing", "training", "held-out");

    // Every order is trained independently, with its own vocabulary
    for order in Order::ALL {
        for smoothing in [false, true] {
            let config = ModelConfig::default().with_smoothing(smoothing);
            let model = NGramModel::train(order, &training, config);

            let training_ppl = model.perplexity(EvaluationSet::Training)?;
            let held_out_ppl = model.perplexity(EvaluationSet::HeldOut(&held_out))?;

            println!(
                "{:<8} {:<9} {:>14.5} {:>14.5}",
                order,
                if smoothing { "laplace" } else { "none" },
                training_ppl,
                held_out_ppl
            );
        }
    }

    // The same query seen through the three orders
    let context = ["HH", "AH0"];
    for order in Order::ALL {
        let model = NGramModel::train(order, &training, ModelConfig::default());
        println!("{} P(L | HH AH0) = {}", order, model.conditional_probability("L", &context));
    }

    Ok(())
}
