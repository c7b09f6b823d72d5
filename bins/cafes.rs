mod launch;

fn main() -> std::process::ExitCode {
    launch::main_for(configs::ServiceKind::Cafes)
}
