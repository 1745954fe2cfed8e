//! Basic usage of the `flat_vec` crate:
//!
//! * Building a container from a literal list.
//! * Appending with doubling growth.
//! * Inserting and removing at arbitrary positions.
//! * Checked versus panicking access.

use flat_vec::FlatVec;

fn main() {
    let mut names = FlatVec::from(["Alice".to_string(), "Bob".to_string()]);

    println!(
        "Starting with {} names in a buffer of {} slots",
        names.len(),
        names.capacity()
    );

    // The literal list filled the buffer exactly, so this append doubles the capacity.
    names.push("Charlie".to_string());
    println!(
        "After push: {} names, {} slots",
        names.len(),
        names.capacity()
    );

    // Insertion shifts the suffix one slot to the right.
    names.insert(1, "Briana".to_string());

    for name in &names {
        println!("- {name}");
    }

    // Checked access returns an error instead of panicking.
    match names.at(99) {
        Ok(name) => println!("Name 99: {name}"),
        Err(error) => println!("No name 99: {error}"),
    }

    // Removal returns the element and closes the gap.
    let removed = names.remove(2);
    println!("Removed {removed}; {} names remain", names.len());

    // Shrinking operations never release capacity.
    names.clear();
    println!(
        "After clear: {} names, still {} slots",
        names.len(),
        names.capacity()
    );
}
