use geodist::haversine_distance;

fn main() {
    println!("{}", haversine_distance(23.0, 12.0, 18.0, 13.0));
}
